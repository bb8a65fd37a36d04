use std::env;

use crate::error::AppError;

/// Resolve the statistics database URL from the environment.
///
/// `DATABASE_URL` wins when set. Otherwise the URL is assembled from
/// `POSTGRES_HOST`, `POSTGRES_PORT`, `POSTGRES_USER`, `POSTGRES_PASSWORD` and
/// `POSTGRES_DB`; if none of the credential variables are set there is no
/// database and `Ok(None)` is returned.
pub fn db_url() -> Result<Option<String>, AppError> {
    db_url_from(|name| env::var(name).ok())
}

fn db_url_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Option<String>, AppError> {
    if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
        return Ok(Some(url));
    }

    let user = lookup("POSTGRES_USER");
    let password = lookup("POSTGRES_PASSWORD");
    let db_name = lookup("POSTGRES_DB");
    if user.is_none() && password.is_none() && db_name.is_none() {
        return Ok(None);
    }

    let host = lookup("POSTGRES_HOST").unwrap_or_else(|| "localhost".to_string());
    let port = lookup("POSTGRES_PORT").unwrap_or_else(|| "5432".to_string());
    let user = user.ok_or_else(|| missing("POSTGRES_USER"))?;
    let password = password.ok_or_else(|| missing("POSTGRES_PASSWORD"))?;
    let db_name = db_name.ok_or_else(|| missing("POSTGRES_DB"))?;

    Ok(Some(format!(
        "postgresql://{user}:{password}@{host}:{port}/{db_name}"
    )))
}

fn missing(name: &str) -> AppError {
    AppError::config(format!("Required environment variable '{name}' is not set"))
}
