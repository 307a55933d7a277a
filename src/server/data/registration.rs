use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbBackend, DbErr, DeleteResult,
    EntityTrait, FromQueryResult, QueryFilter, QueryOrder, QuerySelect,
};

use entity::registration::{self, PaymentStatus, TicketNumbers, Tier};

/// Field set persisted when a registration is first created. Ticket and
/// check-in columns always start empty, so they are not part of this row.
pub struct NewRegistrationRow {
    pub tier: Tier,
    pub name: String,
    pub identity_number: String,
    pub institution: String,
    pub domicile: Option<String>,
    pub email: String,
    pub phone: String,
    pub messaging_handle: Option<String>,
    pub social_handle: Option<String>,
    pub ticket_count: i32,
    pub total_price: i64,
    pub order_id: String,
    pub status: PaymentStatus,
    pub gateway_response: Option<String>,
    pub create_time: DateTime<Utc>,
}

pub struct RegistrationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

#[derive(FromQueryResult)]
struct SeatSum {
    total: Option<i64>,
}

impl<'a, C: ConnectionTrait> RegistrationRepository<'a, C> {
    /// Creates a new instance of [`RegistrationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a new registration row.
    pub async fn create(&self, row: NewRegistrationRow) -> Result<registration::Model, DbErr> {
        let registration = registration::ActiveModel {
            tier: ActiveValue::Set(row.tier),
            name: ActiveValue::Set(row.name),
            identity_number: ActiveValue::Set(row.identity_number),
            institution: ActiveValue::Set(row.institution),
            domicile: ActiveValue::Set(row.domicile),
            email: ActiveValue::Set(row.email),
            phone: ActiveValue::Set(row.phone),
            messaging_handle: ActiveValue::Set(row.messaging_handle),
            social_handle: ActiveValue::Set(row.social_handle),
            ticket_count: ActiveValue::Set(row.ticket_count),
            total_price: ActiveValue::Set(row.total_price),
            order_id: ActiveValue::Set(row.order_id),
            status: ActiveValue::Set(row.status),
            gateway_response: ActiveValue::Set(row.gateway_response),
            ticket_numbers: ActiveValue::Set(TicketNumbers::default()),
            checkin_status: ActiveValue::Set(false),
            checked_in_numbers: ActiveValue::Set(TicketNumbers::default()),
            create_time: ActiveValue::Set(row.create_time),
            ..Default::default()
        };

        registration.insert(self.db).await
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Option<registration::Model>, DbErr> {
        entity::prelude::Registration::find_by_id(id)
            .one(self.db)
            .await
    }

    /// Loads a registration for mutation.
    ///
    /// Takes a row lock on Postgres; sqlite serializes writers at the
    /// connection level and does not parse `FOR UPDATE`.
    pub async fn get_by_id_for_update(
        &self,
        id: i64,
    ) -> Result<Option<registration::Model>, DbErr> {
        let mut query = entity::prelude::Registration::find_by_id(id);

        if self.db.get_database_backend() == DbBackend::Postgres {
            query = query.lock_exclusive();
        }

        query.one(self.db).await
    }

    pub async fn list(
        &self,
        tier: Option<Tier>,
        status: Option<PaymentStatus>,
    ) -> Result<Vec<registration::Model>, DbErr> {
        let mut query = entity::prelude::Registration::find();

        if let Some(tier) = tier {
            query = query.filter(registration::Column::Tier.eq(tier));
        }
        if let Some(status) = status {
            query = query.filter(registration::Column::Status.eq(status));
        }

        query
            .order_by_asc(registration::Column::Id)
            .all(self.db)
            .await
    }

    /// Loads every row of a tier while locking them against concurrent
    /// registrations. The capacity decision must be made on this snapshot.
    pub async fn list_by_tier_for_update(
        &self,
        tier: Tier,
    ) -> Result<Vec<registration::Model>, DbErr> {
        let mut query =
            entity::prelude::Registration::find().filter(registration::Column::Tier.eq(tier));

        if self.db.get_database_backend() == DbBackend::Postgres {
            query = query.lock_exclusive();
        }

        query.all(self.db).await
    }

    /// Sums `ticket_count` over the filtered rows SQL-side.
    pub async fn sum_seats(
        &self,
        tier: Option<Tier>,
        status: Option<PaymentStatus>,
    ) -> Result<i64, DbErr> {
        let mut query = entity::prelude::Registration::find()
            .select_only()
            .column_as(registration::Column::TicketCount.sum(), "total");

        if let Some(tier) = tier {
            query = query.filter(registration::Column::Tier.eq(tier));
        }
        if let Some(status) = status {
            query = query.filter(registration::Column::Status.eq(status));
        }

        let row = query.into_model::<SeatSum>().one(self.db).await?;

        Ok(row.and_then(|r| r.total).unwrap_or(0))
    }

    /// Deletes the rows of one email within a tier whose status is in
    /// `statuses`.
    ///
    /// Returns OK regardless of any row existing; check
    /// [`DeleteResult::rows_affected`] for the outcome.
    pub async fn delete_by_email(
        &self,
        tier: Tier,
        email: &str,
        statuses: &[PaymentStatus],
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::Registration::delete_many()
            .filter(registration::Column::Tier.eq(tier))
            .filter(registration::Column::Email.eq(email))
            .filter(registration::Column::Status.is_in(statuses.iter().copied()))
            .exec(self.db)
            .await
    }

    /// Deletes one row by id as long as its status is still in `statuses`.
    ///
    /// Zero rows affected means the row was concurrently removed or moved
    /// to a status outside the set.
    pub async fn delete_by_id(
        &self,
        id: i64,
        statuses: &[PaymentStatus],
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::Registration::delete_many()
            .filter(registration::Column::Id.eq(id))
            .filter(registration::Column::Status.is_in(statuses.iter().copied()))
            .exec(self.db)
            .await
    }

    pub async fn update(
        &self,
        registration: registration::ActiveModel,
    ) -> Result<registration::Model, DbErr> {
        registration.update(self.db).await
    }
}
