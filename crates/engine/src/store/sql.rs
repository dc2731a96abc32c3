//! sea-orm backed implementation of the repositories.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, TransactionTrait,
    sea_query::Expr,
};

use crate::{
    City, Hotel, NewHotel, NewUser, ResultEngine, Session, User, cities, hotels,
    repository::{CityRepository, HotelRepository, SessionRepository, UserRepository},
    sessions, users,
};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

#[derive(Clone, Debug)]
pub struct SqlStore {
    database: DatabaseConnection,
}

impl SqlStore {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

#[async_trait]
impl CityRepository for SqlStore {
    async fn find_city(&self, code: &str) -> ResultEngine<Option<City>> {
        Ok(cities::Entity::find_by_id(code.to_string())
            .one(&self.database)
            .await?
            .map(City::from))
    }

    async fn insert_city(&self, city: &City) -> ResultEngine<()> {
        cities::ActiveModel::from(city).insert(&self.database).await?;
        Ok(())
    }

    async fn cities_with_name_prefix(&self, prefix: &str) -> ResultEngine<Vec<City>> {
        // SQLite's LOWER and LIKE fold ASCII only, so matching happens here.
        let prefix = prefix.to_lowercase();
        let models = cities::Entity::find()
            .order_by_asc(cities::Column::Code)
            .all(&self.database)
            .await?;
        Ok(models
            .into_iter()
            .map(City::from)
            .filter(|city| city.name.to_lowercase().starts_with(&prefix))
            .collect())
    }

    async fn delete_city(&self, code: &str) -> ResultEngine<bool> {
        with_tx!(self, |db_tx| {
            if cities::Entity::find_by_id(code.to_string())
                .one(&db_tx)
                .await?
                .is_none()
            {
                return Ok(false);
            }

            // SQLite only honours the schema cascades with the FK pragma on.
            hotels::Entity::delete_many()
                .filter(hotels::Column::CityCode.eq(code))
                .exec(&db_tx)
                .await?;
            users::Entity::update_many()
                .col_expr(
                    users::Column::CityCode,
                    Expr::value(Option::<String>::None).into(),
                )
                .filter(users::Column::CityCode.eq(code))
                .exec(&db_tx)
                .await?;
            cities::Entity::delete_by_id(code.to_string())
                .exec(&db_tx)
                .await?;
            Ok(true)
        })
    }

    async fn count_cities(&self) -> ResultEngine<u64> {
        Ok(cities::Entity::find().count(&self.database).await?)
    }
}

#[async_trait]
impl HotelRepository for SqlStore {
    async fn find_hotel_by_code(&self, code: &str) -> ResultEngine<Option<Hotel>> {
        Ok(hotels::Entity::find()
            .filter(hotels::Column::Code.eq(code))
            .one(&self.database)
            .await?
            .map(Hotel::from))
    }

    async fn find_hotel_in_city(&self, id: i32, city_code: &str) -> ResultEngine<Option<Hotel>> {
        Ok(hotels::Entity::find_by_id(id)
            .filter(hotels::Column::CityCode.eq(city_code))
            .one(&self.database)
            .await?
            .map(Hotel::from))
    }

    async fn hotels_in_city(&self, city_code: &str) -> ResultEngine<Vec<Hotel>> {
        let models = hotels::Entity::find()
            .filter(hotels::Column::CityCode.eq(city_code))
            .order_by_asc(hotels::Column::Code)
            .all(&self.database)
            .await?;
        Ok(models.into_iter().map(Hotel::from).collect())
    }

    async fn insert_hotel(&self, hotel: &NewHotel) -> ResultEngine<Hotel> {
        let model = hotels::ActiveModel::from(hotel)
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }

    async fn update_hotel(&self, hotel: &Hotel) -> ResultEngine<()> {
        hotels::ActiveModel {
            id: ActiveValue::Unchanged(hotel.id),
            code: ActiveValue::Set(hotel.code.clone()),
            name: ActiveValue::Set(hotel.name.clone()),
            city_code: ActiveValue::NotSet,
        }
        .update(&self.database)
        .await?;
        Ok(())
    }

    async fn delete_hotel_in_city(&self, id: i32, city_code: &str) -> ResultEngine<bool> {
        let result = hotels::Entity::delete_many()
            .filter(hotels::Column::Id.eq(id))
            .filter(hotels::Column::CityCode.eq(city_code))
            .exec(&self.database)
            .await?;
        Ok(result.rows_affected > 0)
    }

    async fn count_hotels(&self) -> ResultEngine<u64> {
        Ok(hotels::Entity::find().count(&self.database).await?)
    }
}

#[async_trait]
impl UserRepository for SqlStore {
    async fn find_user(&self, id: i32) -> ResultEngine<Option<User>> {
        Ok(users::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(User::from))
    }

    async fn find_user_by_username(&self, username: &str) -> ResultEngine<Option<User>> {
        Ok(users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await?
            .map(User::from))
    }

    async fn insert_user(&self, user: &NewUser) -> ResultEngine<User> {
        let model = users::ActiveModel::from(user)
            .insert(&self.database)
            .await?;
        Ok(model.into())
    }
}

#[async_trait]
impl SessionRepository for SqlStore {
    async fn insert_session(&self, session: &Session) -> ResultEngine<()> {
        sessions::ActiveModel::from(session)
            .insert(&self.database)
            .await?;
        Ok(())
    }

    async fn find_session(&self, token: &str) -> ResultEngine<Option<Session>> {
        Ok(sessions::Entity::find_by_id(token.to_string())
            .one(&self.database)
            .await?
            .map(Session::from))
    }

    async fn delete_session(&self, token: &str) -> ResultEngine<()> {
        sessions::Entity::delete_by_id(token.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }
}

