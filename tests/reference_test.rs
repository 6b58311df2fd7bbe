mod common;

use ctd_log::reference::{self, NewShip, SearchTarget};

async fn ship(db: &sea_orm::DatabaseConnection, name: &str) {
    reference::create_ship(
        db,
        NewShip {
            ship_name: name.into(),
            ship_number: None,
            ship_abbreviation: None,
        },
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn search_matches_wildcard_characters_literally() {
    let db = common::setup_db().await;
    ship(&db, "RV Tethys").await;
    ship(&db, "RV_Knorr").await;
    ship(&db, "Endeavour 100%").await;

    let labels = |hits: Vec<reference::SearchHit>| hits.into_iter().map(|h| h.label).collect::<Vec<_>>();

    let underscore = reference::search(&db, SearchTarget::Ships, "_", 20).await.unwrap();
    assert_eq!(labels(underscore), ["RV_Knorr"]);

    let percent = reference::search(&db, SearchTarget::Ships, "%", 20).await.unwrap();
    assert_eq!(labels(percent), ["Endeavour 100%"]);

    let plain = reference::search(&db, SearchTarget::Ships, "RV", 20).await.unwrap();
    assert_eq!(labels(plain), ["RV Tethys", "RV_Knorr"]);
}
