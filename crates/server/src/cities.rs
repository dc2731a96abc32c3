//! Public lookup endpoints.

use api_types::{
    city::{AutocompleteQuery, CityView},
    hotel::{HotelEntry, HotelsByCity},
};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
};
use engine::{Caller, EngineError, Role};

use crate::{ServerError, server::ServerState};

pub async fn landing(Extension(caller): Extension<Caller>) -> String {
    let role = match caller.role() {
        Role::Superuser => "superuser",
        Role::Manager => "manager",
        Role::Anonymous => return "Hotel directory".to_string(),
    };
    let username = caller.user().map(|user| user.username.as_str()).unwrap_or_default();
    format!("Hotel directory - signed in as {username} ({role})")
}

pub async fn autocomplete(
    State(state): State<ServerState>,
    Query(query): Query<AutocompleteQuery>,
) -> Result<Json<Vec<CityView>>, ServerError> {
    let cities = state
        .engine
        .autocomplete_cities(&query.q)
        .await?
        .into_iter()
        .map(|city| CityView {
            id: city.code,
            name: city.name,
        })
        .collect();

    Ok(Json(cities))
}

pub async fn hotels(
    State(state): State<ServerState>,
    Path(city_code): Path<String>,
) -> Result<Json<HotelsByCity>, ServerError> {
    let hotels = match state.engine.hotels_by_city(&city_code).await {
        Ok(hotels) => hotels,
        Err(EngineError::KeyNotFound(_)) => return Err(ServerError::NotFound("City not found")),
        Err(err) => return Err(err.into()),
    };

    Ok(Json(HotelsByCity {
        hotels: hotels
            .into_iter()
            .map(|hotel| HotelEntry {
                name: hotel.name,
                code: hotel.code,
            })
            .collect(),
    }))
}
