#![allow(dead_code)]

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

use ctd_log::config::Config;
use ctd_log::entity::roles::RoleName;
use ctd_log::identity::accounts::{self, NewUser, UserSummary};
use ctd_log::reference::{self, NewCruise, NewNiskin, NewShip, NewStation};

pub const PASSWORD: &str = "correct horse battery";
pub const BCRYPT_COST: u32 = 4;

pub fn test_config() -> Config {
    let mut config = Config::with_database_url("sqlite::memory:");
    config.bcrypt_cost = BCRYPT_COST;
    config.disable_rate_limiting = true;
    config
}

pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn user(db: &DatabaseConnection, username: &str, roles: &[RoleName]) -> UserSummary {
    accounts::create_user(
        db,
        NewUser {
            username: username.into(),
            password: PASSWORD.into(),
            first_name: "Test".into(),
            last_name: username.into(),
            roles: roles.to_vec(),
        },
        BCRYPT_COST,
    )
    .await
    .unwrap()
}

/// Ship, cruise AB-24 and station STN1 at (10.0, -20.0) plus Niskins 1 to 4.
pub struct Voyage {
    pub observer_id: i32,
    pub ship_id: i32,
    pub cruise_id: i32,
    pub station_id: i32,
    pub niskin_ids: Vec<i32>,
}

pub async fn voyage(db: &DatabaseConnection) -> Voyage {
    let observer = user(db, "observer", &[RoleName::Observer]).await;

    let ship = reference::create_ship(
        db,
        NewShip {
            ship_name: "RV Atlantic Explorer".into(),
            ship_number: Some(1),
            ship_abbreviation: Some("AE".into()),
        },
    )
    .await
    .unwrap();

    let cruise = reference::create_cruise(
        db,
        NewCruise {
            cruise_number: 24,
            cruise_name: "AB-24".into(),
            cruise_abbreviation: None,
        },
    )
    .await
    .unwrap();

    let station = reference::create_station(
        db,
        NewStation {
            cruise_id: cruise.cruise_id,
            station_number: "STN1".into(),
            station_name: "Station One".into(),
            station_abbreviation: None,
            latitude: Some(10.0),
            longitude: Some(-20.0),
        },
    )
    .await
    .unwrap();

    let mut niskin_ids = Vec::new();
    for number in 1..=4 {
        let niskin = reference::create_niskin(
            db,
            NewNiskin {
                niskin_number: number,
                status: None,
                notes: None,
            },
        )
        .await
        .unwrap();
        niskin_ids.push(niskin.niskin_id);
    }

    Voyage {
        observer_id: observer.user_id,
        ship_id: ship.ship_id,
        cruise_id: cruise.cruise_id,
        station_id: station.station_id,
        niskin_ids,
    }
}

impl Voyage {
    pub fn new_cast(&self, cast_number: i32) -> ctd_log::cast::NewCast {
        ctd_log::cast::NewCast {
            ship_id: self.ship_id,
            station_id: self.station_id,
            cruise_id: self.cruise_id,
            observer_user_id: self.observer_id,
            cast_number,
            cast_date: None,
            notes: None,
        }
    }
}
