use crate::error::{AppError, AppResult};

/// bcrypt is CPU-bound; keep it off the async workers.
pub async fn hash_password(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AppError::Internal(format!("hash task failed: {e}")))?
        .map_err(|e| AppError::Internal(format!("bcrypt hash failed: {e}")))
}

/// Spend one verification at `cost` on a hash nobody's password matches, so an
/// unknown username takes as long to refuse as a wrong password.
pub async fn burn_verification(password: String, cost: u32) -> AppResult<()> {
    let hash = format!("$2b${cost:02}$EGdrhbKUv8Oc9vGiXX0HQOxSg445d458Muh7DAHskb6QbtCvdxcie");
    verify_password(password, hash).await.map(|_| ())
}

/// A malformed stored hash counts as a mismatch.
pub async fn verify_password(password: String, hash: String) -> AppResult<bool> {
    let outcome = tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|e| AppError::Internal(format!("verify task failed: {e}")))?;

    match outcome {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "stored_password_hash_unreadable");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn hash_then_verify() {
        let hash = hash_password("deck-unit".into(), 4).await.unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("deck-unit".into(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".into(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn garbage_hash_is_a_mismatch() {
        assert!(!verify_password("x".into(), "plaintext".into()).await.unwrap());
    }

    #[tokio::test]
    async fn burned_verification_runs_at_the_requested_cost() {
        let cheap = std::time::Instant::now();
        burn_verification("x".into(), 4).await.unwrap();
        let cheap = cheap.elapsed();

        let costly = std::time::Instant::now();
        burn_verification("x".into(), 8).await.unwrap();
        assert!(costly.elapsed() > cheap * 4);
    }
}
