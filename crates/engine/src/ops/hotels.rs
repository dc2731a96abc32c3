//! Hotel writes and manager-scoped hotel CRUD.
//!
//! Every manager operation takes a [`ManagerContext`] and filters by its
//! city. A hotel outside that city is reported exactly like a hotel that
//! does not exist.

use crate::{
    EngineError, Hotel, HotelCmd, NewHotel, ResultEngine,
    hotels::{hotel_code, hotel_name},
};

use super::{Engine, ManagerContext};

fn hotel_not_found(id: i32) -> EngineError {
    EngineError::KeyNotFound(format!("hotel {id}"))
}

impl Engine {
    /// Persist a hotel after checking its city exists and its code is free.
    pub async fn new_hotel(&self, hotel: NewHotel) -> ResultEngine<Hotel> {
        if self.store.find_city(&hotel.city_code).await?.is_none() {
            return Err(EngineError::KeyNotFound(hotel.city_code));
        }
        if self.store.find_hotel_by_code(&hotel.code).await?.is_some() {
            return Err(EngineError::ExistingKey(hotel.code));
        }
        let stored = self.store.insert_hotel(&hotel).await?;
        tracing::debug!(id = stored.id, code = %stored.code, city = %stored.city_code, "hotel created");
        Ok(stored)
    }

    pub async fn manager_hotels(&self, ctx: &ManagerContext) -> ResultEngine<Vec<Hotel>> {
        self.store.hotels_in_city(&ctx.city_code).await
    }

    pub async fn manager_hotel(&self, ctx: &ManagerContext, id: i32) -> ResultEngine<Hotel> {
        self.store
            .find_hotel_in_city(id, &ctx.city_code)
            .await?
            .ok_or_else(|| hotel_not_found(id))
    }

    /// Create a hotel in the manager's city.
    pub async fn manager_create_hotel(
        &self,
        ctx: &ManagerContext,
        cmd: HotelCmd,
    ) -> ResultEngine<Hotel> {
        let hotel = NewHotel::new(&cmd.code, &cmd.name, &ctx.city_code)?;
        self.new_hotel(hotel).await
    }

    /// Rename or re-code a hotel of the manager's city. The city never changes.
    pub async fn manager_edit_hotel(
        &self,
        ctx: &ManagerContext,
        id: i32,
        cmd: HotelCmd,
    ) -> ResultEngine<Hotel> {
        let mut hotel = self.manager_hotel(ctx, id).await?;
        let code = hotel_code(&cmd.code)?;
        let name = hotel_name(&cmd.name)?;

        if code != hotel.code
            && let Some(other) = self.store.find_hotel_by_code(&code).await?
            && other.id != hotel.id
        {
            return Err(EngineError::ExistingKey(code));
        }

        hotel.code = code;
        hotel.name = name;
        self.store.update_hotel(&hotel).await?;
        Ok(hotel)
    }

    pub async fn manager_delete_hotel(&self, ctx: &ManagerContext, id: i32) -> ResultEngine<()> {
        if !self.store.delete_hotel_in_city(id, &ctx.city_code).await? {
            return Err(hotel_not_found(id));
        }
        tracing::debug!(id, user = %ctx.user.username, "hotel deleted");
        Ok(())
    }

    pub async fn count_hotels(&self) -> ResultEngine<u64> {
        self.store.count_hotels().await
    }
}
