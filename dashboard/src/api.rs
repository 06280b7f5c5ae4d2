//! ==============================================================================
//! api.rs - client for the to-do rest api
//! ==============================================================================
//!
//! one function per endpoint, one http call each. nothing is retried;
//! the controller turns every `Result` into a state event.
//!
//! ==============================================================================

use gloo_net::http::{Request, Response};
use shared::{ApiConfig, ApiError, Category, ItemId, TodoItem};

// ==============================================================================
// API functions
// ==============================================================================

/// Load every category with its embedded items
pub async fn fetch_categories(config: &ApiConfig) -> Result<Vec<Category>, ApiError> {
    let response = Request::get(&config.categories_url())
        .header("Accept", "application/json")
        .send()
        .await
        .map_err(network)?;

    check_status(response)?
        .json::<Vec<Category>>()
        .await
        .map_err(decode)
}

/// Create an item; returns the stored item when the server echoes it back
pub async fn create_item(config: &ApiConfig, item: &TodoItem) -> Result<Option<TodoItem>, ApiError> {
    let response = Request::post(&config.items_url())
        .header("Accept", "application/json")
        .json(item)
        .map_err(encode)?
        .send()
        .await
        .map_err(network)?;

    let body = check_status(response)?.text().await.map_err(decode)?;
    if body.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<TodoItem>(&body) {
        Ok(created) => Ok(Some(created)),
        Err(err) => {
            tracing::debug!(error = %err, "create response is not an item");
            Ok(None)
        }
    }
}

/// Replace an item
pub async fn update_item(config: &ApiConfig, id: &ItemId, item: &TodoItem) -> Result<(), ApiError> {
    let response = Request::put(&config.item_url(id))
        .header("Accept", "application/json")
        .json(item)
        .map_err(encode)?
        .send()
        .await
        .map_err(network)?;

    check_status(response).map(|_| ())
}

/// Delete an item
pub async fn delete_item(config: &ApiConfig, id: &ItemId) -> Result<(), ApiError> {
    let response = Request::delete(&config.item_url(id))
        .send()
        .await
        .map_err(network)?;

    check_status(response).map(|_| ())
}

// ==============================================================================
// helpers
// ==============================================================================

fn check_status(response: Response) -> Result<Response, ApiError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(ApiError::Status {
            status: response.status(),
            reason: response.status_text(),
        })
    }
}

fn network(err: gloo_net::Error) -> ApiError {
    ApiError::Network(err.to_string())
}

fn decode(err: gloo_net::Error) -> ApiError {
    ApiError::Decode(err.to_string())
}

fn encode(err: gloo_net::Error) -> ApiError {
    ApiError::Encode(err.to_string())
}
