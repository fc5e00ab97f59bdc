use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DatabaseConnection, DbErr,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::server::model::user::CreateAddressParams;

pub struct AddressRepository<'a, C = DatabaseConnection> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AddressRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Gets a user's addresses, default first.
    pub async fn get_by_user(&self, user_id: i32) -> Result<Vec<entity::user_address::Model>, DbErr> {
        entity::prelude::UserAddress::find()
            .filter(entity::user_address::Column::UserId.eq(user_id))
            .order_by_desc(entity::user_address::Column::IsDefault)
            .order_by_asc(entity::user_address::Column::Id)
            .all(self.db)
            .await
    }

    /// Adds an address for a user.
    ///
    /// The first address always becomes the default. When the new address is marked
    /// default, every other address of the user loses the flag so at most one remains.
    pub async fn create(
        &self,
        user_id: i32,
        params: CreateAddressParams,
    ) -> Result<entity::user_address::Model, DbErr> {
        let existing = entity::prelude::UserAddress::find()
            .filter(entity::user_address::Column::UserId.eq(user_id))
            .count(self.db)
            .await?;

        let is_default = params.is_default || existing == 0;

        if is_default && existing > 0 {
            entity::prelude::UserAddress::update_many()
                .col_expr(
                    entity::user_address::Column::IsDefault,
                    sea_orm::sea_query::Expr::value(false),
                )
                .filter(entity::user_address::Column::UserId.eq(user_id))
                .exec(self.db)
                .await?;
        }

        entity::user_address::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            label: ActiveValue::Set(params.label),
            street: ActiveValue::Set(params.street),
            city: ActiveValue::Set(params.city),
            state: ActiveValue::Set(params.state),
            postal_code: ActiveValue::Set(params.postal_code),
            is_default: ActiveValue::Set(is_default),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }

    /// Deletes an address if it belongs to the user.
    ///
    /// # Returns
    /// - `Ok(true)` - Address deleted
    /// - `Ok(false)` - No such address for this user
    pub async fn delete(&self, user_id: i32, address_id: i32) -> Result<bool, DbErr> {
        let result = entity::prelude::UserAddress::delete_many()
            .filter(entity::user_address::Column::Id.eq(address_id))
            .filter(entity::user_address::Column::UserId.eq(user_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected > 0)
    }
}
