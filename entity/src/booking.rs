use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "booking")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub house_owner_id: i32,
    pub service_id: i32,
    pub technician_id: Option<i32>,
    pub scheduled_date: Date,
    pub scheduled_time: Time,
    pub address: String,
    pub notes: Option<String>,
    pub status: String,
    pub inventory_status: String,
    pub total_amount: f64,
    pub payment_status: String,
    pub payment_intent_id: Option<String>,
    pub paid_at: Option<DateTimeUtc>,
    pub cancellation_reason: Option<String>,
    pub reminder_sent: bool,
    pub accepted_at: Option<DateTimeUtc>,
    pub started_at: Option<DateTimeUtc>,
    pub completed_at: Option<DateTimeUtc>,
    pub rejected_at: Option<DateTimeUtc>,
    pub cancelled_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::HouseOwnerId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    HouseOwner,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::TechnicianId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Technician,
    #[sea_orm(
        belongs_to = "super::service_offering::Entity",
        from = "Column::ServiceId",
        to = "super::service_offering::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    ServiceOffering,
    #[sea_orm(has_many = "super::booking_item::Entity")]
    BookingItem,
}

impl Related<super::service_offering::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ServiceOffering.def()
    }
}

impl Related<super::booking_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BookingItem.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
