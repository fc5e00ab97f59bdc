use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "feedback")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub booking_id: i32,
    pub house_owner_id: i32,
    pub technician_id: Option<i32>,
    pub service_id: i32,
    pub rating: i32,
    pub quality_rating: Option<i32>,
    pub punctuality_rating: Option<i32>,
    pub professionalism_rating: Option<i32>,
    pub value_rating: Option<i32>,
    pub comment: Option<String>,
    pub is_auto_generated: bool,
    pub status: String,
    pub admin_response: Option<String>,
    pub responded_by: Option<i32>,
    pub responded_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::booking::Entity",
        from = "Column::BookingId",
        to = "super::booking::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Booking,
}

impl Related<super::booking::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
