//! Manager endpoints. Every handler runs behind the manager guard and
//! receives the caller's [`ManagerContext`].

use api_types::{
    city::CityView,
    hotel::{HotelForm, HotelView, ManagerHotels},
};
use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{Hotel, HotelCmd, ManagerContext};

use crate::{ServerError, server::ServerState};

fn map_hotel(hotel: Hotel) -> HotelView {
    HotelView {
        id: hotel.id,
        code: hotel.code,
        name: hotel.name,
        city: hotel.city_code,
    }
}

fn command(form: HotelForm) -> HotelCmd {
    if let Some(city) = &form.city {
        tracing::debug!(city = %city, "ignoring city in hotel payload");
    }
    HotelCmd::new(form.code, form.name)
}

pub async fn list(
    Extension(ctx): Extension<ManagerContext>,
    State(state): State<ServerState>,
) -> Result<Json<ManagerHotels>, ServerError> {
    let city = state.engine.city(&ctx.city_code).await?;
    let hotels = state
        .engine
        .manager_hotels(&ctx)
        .await?
        .into_iter()
        .map(map_hotel)
        .collect();

    Ok(Json(ManagerHotels {
        city: CityView {
            id: city.code,
            name: city.name,
        },
        hotels,
    }))
}

pub async fn create(
    Extension(ctx): Extension<ManagerContext>,
    State(state): State<ServerState>,
    Json(payload): Json<HotelForm>,
) -> Result<(StatusCode, Json<HotelView>), ServerError> {
    let hotel = state
        .engine
        .manager_create_hotel(&ctx, command(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(map_hotel(hotel))))
}

pub async fn show(
    Extension(ctx): Extension<ManagerContext>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Json<HotelView>, ServerError> {
    let hotel = state.engine.manager_hotel(&ctx, id).await?;
    Ok(Json(map_hotel(hotel)))
}

pub async fn update(
    Extension(ctx): Extension<ManagerContext>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(payload): Json<HotelForm>,
) -> Result<Json<HotelView>, ServerError> {
    let hotel = state
        .engine
        .manager_edit_hotel(&ctx, id, command(payload))
        .await?;

    Ok(Json(map_hotel(hotel)))
}

pub async fn delete(
    Extension(ctx): Extension<ManagerContext>,
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ServerError> {
    state.engine.manager_delete_hotel(&ctx, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
