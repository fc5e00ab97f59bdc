use chrono::{DateTime, Utc};
use std::str::FromStr;

use crate::{
    model::feedback::{
        AdminResponseDto, CategoryRatingsDto, CreateFeedbackDto, FeedbackDto,
        PaginatedFeedbackDto, RatingSummaryDto,
    },
    server::{
        error::AppError,
        model::{parse_stored, UnknownVariant},
    },
};

pub const MIN_RATING: i32 = 1;
pub const MAX_RATING: i32 = 5;

/// Moderation state. Only published feedback is shown publicly or counted in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedbackStatus {
    Pending,
    Published,
    Hidden,
}

impl FeedbackStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FeedbackStatus::Pending => "pending",
            FeedbackStatus::Published => "published",
            FeedbackStatus::Hidden => "hidden",
        }
    }
}

impl FromStr for FeedbackStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(FeedbackStatus::Pending),
            "published" => Ok(FeedbackStatus::Published),
            "hidden" => Ok(FeedbackStatus::Hidden),
            other => Err(UnknownVariant {
                kind: "feedback status",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryRatings {
    pub quality: Option<i32>,
    pub punctuality: Option<i32>,
    pub professionalism: Option<i32>,
    pub value: Option<i32>,
}

impl CategoryRatings {
    pub fn from_dto(dto: CategoryRatingsDto) -> Self {
        Self {
            quality: dto.quality,
            punctuality: dto.punctuality,
            professionalism: dto.professionalism,
            value: dto.value,
        }
    }

    /// Every category rated at the maximum, used for auto-generated feedback.
    pub fn max() -> Self {
        Self {
            quality: Some(MAX_RATING),
            punctuality: Some(MAX_RATING),
            professionalism: Some(MAX_RATING),
            value: Some(MAX_RATING),
        }
    }

    fn values(&self) -> [(&'static str, Option<i32>); 4] {
        [
            ("quality", self.quality),
            ("punctuality", self.punctuality),
            ("professionalism", self.professionalism),
            ("value", self.value),
        ]
    }

    pub fn into_dto(self) -> CategoryRatingsDto {
        CategoryRatingsDto {
            quality: self.quality,
            punctuality: self.punctuality,
            professionalism: self.professionalism,
            value: self.value,
        }
    }
}

/// Rejects ratings outside 1..=5, overall and per category.
pub fn validate_ratings(rating: i32, categories: &CategoryRatings) -> Result<(), AppError> {
    let in_range = |r: i32| (MIN_RATING..=MAX_RATING).contains(&r);

    if !in_range(rating) {
        return Err(AppError::BadRequest(format!(
            "Rating must be between {} and {}",
            MIN_RATING, MAX_RATING
        )));
    }

    for (name, value) in categories.values() {
        if let Some(value) = value {
            if !in_range(value) {
                return Err(AppError::BadRequest(format!(
                    "{} rating must be between {} and {}",
                    name, MIN_RATING, MAX_RATING
                )));
            }
        }
    }

    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct AdminResponse {
    pub message: String,
    pub responded_by: Option<i32>,
    pub responded_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feedback {
    pub id: i32,
    pub booking_id: i32,
    pub house_owner_id: i32,
    pub technician_id: Option<i32>,
    pub service_id: i32,
    pub rating: i32,
    pub categories: CategoryRatings,
    pub comment: Option<String>,
    pub is_auto_generated: bool,
    pub status: FeedbackStatus,
    pub admin_response: Option<AdminResponse>,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    pub fn from_entity(entity: entity::feedback::Model) -> Result<Self, AppError> {
        let admin_response = entity.admin_response.map(|message| AdminResponse {
            message,
            responded_by: entity.responded_by,
            responded_at: entity.responded_at,
        });

        Ok(Self {
            id: entity.id,
            booking_id: entity.booking_id,
            house_owner_id: entity.house_owner_id,
            technician_id: entity.technician_id,
            service_id: entity.service_id,
            rating: entity.rating,
            categories: CategoryRatings {
                quality: entity.quality_rating,
                punctuality: entity.punctuality_rating,
                professionalism: entity.professionalism_rating,
                value: entity.value_rating,
            },
            comment: entity.comment,
            is_auto_generated: entity.is_auto_generated,
            status: parse_stored("feedback status", &entity.status)?,
            admin_response,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> FeedbackDto {
        FeedbackDto {
            id: self.id,
            booking_id: self.booking_id,
            house_owner_id: self.house_owner_id,
            technician_id: self.technician_id,
            service_id: self.service_id,
            rating: self.rating,
            categories: self.categories.into_dto(),
            comment: self.comment,
            is_auto_generated: self.is_auto_generated,
            status: self.status.as_str().to_string(),
            admin_response: self.admin_response.map(|r| AdminResponseDto {
                message: r.message,
                responded_by: r.responded_by,
                responded_at: r.responded_at,
            }),
            created_at: self.created_at,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedFeedback {
    pub feedback: Vec<Feedback>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedFeedback {
    pub fn into_dto(self) -> PaginatedFeedbackDto {
        PaginatedFeedbackDto {
            feedback: self.feedback.into_iter().map(Feedback::into_dto).collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CreateFeedbackParams {
    pub booking_id: i32,
    pub house_owner_id: i32,
    pub technician_id: Option<i32>,
    pub service_id: i32,
    pub rating: i32,
    pub categories: CategoryRatings,
    pub comment: Option<String>,
    pub is_auto_generated: bool,
    pub status: FeedbackStatus,
}

/// Feedback as submitted by a house owner.
#[derive(Debug, Clone)]
pub struct SubmitFeedbackParams {
    pub booking_id: i32,
    pub rating: i32,
    pub categories: CategoryRatings,
    pub comment: Option<String>,
}

impl SubmitFeedbackParams {
    pub fn from_dto(dto: CreateFeedbackDto) -> Self {
        Self {
            booking_id: dto.booking_id,
            rating: dto.rating,
            categories: dto.categories.map(CategoryRatings::from_dto).unwrap_or_default(),
            comment: dto
                .comment
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty()),
        }
    }
}

/// Average ratings for a technician over published feedback.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSummary {
    pub technician_id: i32,
    pub average_rating: f64,
    pub total_reviews: u64,
    pub quality: Option<f64>,
    pub punctuality: Option<f64>,
    pub professionalism: Option<f64>,
    pub value: Option<f64>,
}

impl RatingSummary {
    /// Computes the summary from a technician's feedback.
    ///
    /// Category averages only include feedback that rated that category; the overall
    /// average is rounded to one decimal place.
    pub fn from_feedback(technician_id: i32, feedback: &[Feedback]) -> Self {
        fn average(values: impl Iterator<Item = i32>) -> Option<f64> {
            let (sum, count) = values.fold((0i64, 0u32), |(s, c), v| (s + v as i64, c + 1));
            if count == 0 {
                None
            } else {
                Some(((sum as f64 / count as f64) * 10.0).round() / 10.0)
            }
        }

        Self {
            technician_id,
            average_rating: average(feedback.iter().map(|f| f.rating)).unwrap_or(0.0),
            total_reviews: feedback.len() as u64,
            quality: average(feedback.iter().filter_map(|f| f.categories.quality)),
            punctuality: average(feedback.iter().filter_map(|f| f.categories.punctuality)),
            professionalism: average(
                feedback.iter().filter_map(|f| f.categories.professionalism),
            ),
            value: average(feedback.iter().filter_map(|f| f.categories.value)),
        }
    }

    pub fn into_dto(self) -> RatingSummaryDto {
        RatingSummaryDto {
            technician_id: self.technician_id,
            average_rating: self.average_rating,
            total_reviews: self.total_reviews,
            quality: self.quality,
            punctuality: self.punctuality,
            professionalism: self.professionalism,
            value: self.value,
        }
    }
}
