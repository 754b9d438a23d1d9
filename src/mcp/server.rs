//! PawPal MCP Server Implementation
//!
//! Implements the MCP server with all PawPal tools.

use std::sync::Arc;

use chrono::{Local, NaiveDate, NaiveDateTime};
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::catalog::Catalog;
use crate::models::{ActivityLevel, DogProfile, DogProfileUpdate, FoodLog};
use crate::tools::advice::{self, AdviceClient};
use crate::tools::dashboard;
use crate::tools::foods;
use crate::tools::meals;
use crate::tools::profile;
use crate::tools::status::StatusTracker;

/// PawPal MCP Service
#[derive(Clone)]
pub struct PawPalService {
    status_tracker: Arc<Mutex<StatusTracker>>,
    catalog: Arc<Catalog>,
    food_log: Arc<Mutex<FoodLog>>,
    profile: Arc<Mutex<DogProfile>>,
    advice: Option<Arc<dyn AdviceClient>>,
    tool_router: ToolRouter<PawPalService>,
}

impl PawPalService {
    pub fn new(
        catalog: Catalog,
        catalog_source: String,
        advice: Option<Arc<dyn AdviceClient>>,
    ) -> Self {
        Self {
            status_tracker: Arc::new(Mutex::new(StatusTracker::new(catalog_source))),
            catalog: Arc::new(catalog),
            food_log: Arc::new(Mutex::new(FoodLog::new())),
            profile: Arc::new(Mutex::new(DogProfile::default())),
            advice,
            tool_router: Self::tool_router(),
        }
    }
}

// ============================================================================
// Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct MealTextParams {
    /// Free text such as "1 cup boiled chicken breast + 1/2 cup white rice"
    pub text: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogTypedMealParams {
    pub text: String,
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct LogFoodParams {
    pub name: String,
    /// Quantity in the food's reference unit
    #[serde(default = "default_quantity")]
    pub quantity: f64,
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
}

fn default_quantity() -> f64 { 1.0 }

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListFoodsParams {
    pub category: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct GetFoodParams {
    pub name: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
    pub weight_kg: Option<f64>,
    pub breed: Option<String>,
    /// neutered, intact, inactive, weight_loss, working or puppy
    pub activity: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DailySummaryParams {
    /// YYYY-MM-DD, defaults to today
    pub date: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AskVetParams {
    pub question: String,
}

// ============================================================================
// Helpers
// ============================================================================

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn parse_date(date: Option<&str>) -> Result<NaiveDate, McpError> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
            McpError::invalid_params(format!("Invalid date '{}', expected YYYY-MM-DD", d), None)
        }),
        None => Ok(Local::now().date_naive()),
    }
}

/// Timestamp for a log entry: the given day at the current local time
fn log_timestamp(date: Option<&str>) -> Result<NaiveDateTime, McpError> {
    let day = parse_date(date)?;
    Ok(day.and_time(Local::now().time()))
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl PawPalService {
    // --- Status ---

    #[tool(description = "Get the current status of the PawPal service including build info, catalog size, and process information")]
    async fn pawpal_status(&self) -> Result<CallToolResult, McpError> {
        let tracker = self.status_tracker.lock().await;
        let status = tracker.get_status(&self.catalog);
        json_result(&status)
    }

    #[tool(description = "Get instructions for logging dog meals. Call this when starting a new feeding session or when unsure how to use the meal tools.")]
    fn meal_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::MEAL_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(MEAL_INSTRUCTIONS)]))
    }

    // --- Meals ---

    #[tool(description = "Scan free text for foods that are dangerous to dogs (grapes, chocolate, xylitol, onion, garlic...). Substring match, so 'grapefruit' is flagged.")]
    fn scan_dangerous_foods(&self, Parameters(p): Parameters<MealTextParams>) -> Result<CallToolResult, McpError> {
        json_result(&meals::scan_dangerous_foods(&p.text))
    }

    #[tool(description = "Estimate calories of a free-text meal without logging it. Items are separated by '+' or ','. Returns matched items, total, toxicity warnings and conversion notes.")]
    fn estimate_meal(&self, Parameters(p): Parameters<MealTextParams>) -> Result<CallToolResult, McpError> {
        let result = meals::estimate_meal(&self.catalog, &p.text).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Estimate and log a free-text meal. Blocked without logging anything if a dangerous keyword or toxic food is found.")]
    async fn log_typed_meal(&self, Parameters(p): Parameters<LogTypedMealParams>) -> Result<CallToolResult, McpError> {
        let now = log_timestamp(p.date.as_deref())?;
        let mut log = self.food_log.lock().await;
        let result = meals::log_typed_meal(&self.catalog, &mut log, &p.text, now)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Log a catalog food by name with a quantity in its reference unit. Toxic foods are refused.")]
    async fn log_food(&self, Parameters(p): Parameters<LogFoodParams>) -> Result<CallToolResult, McpError> {
        let now = log_timestamp(p.date.as_deref())?;
        let mut log = self.food_log.lock().await;
        let result = meals::log_catalog_food(&self.catalog, &mut log, &p.name, p.quantity, now)
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Catalog ---

    #[tool(description = "List food catalog categories with their food counts")]
    fn list_food_categories(&self) -> Result<CallToolResult, McpError> {
        json_result(&foods::list_food_categories(&self.catalog))
    }

    #[tool(description = "List catalog foods with calories per reference unit, optionally filtered by category")]
    fn list_foods(&self, Parameters(p): Parameters<ListFoodsParams>) -> Result<CallToolResult, McpError> {
        let result = foods::list_foods(&self.catalog, p.category.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    #[tool(description = "Look up a catalog food by name. Tolerates case differences, partial names and typos.")]
    fn get_food(&self, Parameters(p): Parameters<GetFoodParams>) -> Result<CallToolResult, McpError> {
        let result = foods::get_food(&self.catalog, &p.name).map_err(|e| McpError::internal_error(e, None))?;
        let json = match result {
            Some(food) => serde_json::to_string_pretty(&food),
            None => serde_json::to_string_pretty(&serde_json::json!({
                "error": "Food not found",
                "name": p.name,
            })),
        }
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
        Ok(CallToolResult::success(vec![Content::text(json)]))
    }

    // --- Profile ---

    #[tool(description = "Get the dog profile and its daily calorie goal")]
    async fn get_profile(&self) -> Result<CallToolResult, McpError> {
        let dog = self.profile.lock().await;
        json_result(&profile::get_profile(&dog))
    }

    #[tool(description = "Update the dog profile. Only provided fields change. Activity: neutered, intact, inactive, weight_loss, working, puppy.")]
    async fn update_profile(&self, Parameters(p): Parameters<UpdateProfileParams>) -> Result<CallToolResult, McpError> {
        let activity = match p.activity.as_deref() {
            Some(a) => Some(ActivityLevel::from_str(a).ok_or_else(|| {
                McpError::invalid_params(format!("Unknown activity level '{}'", a), None)
            })?),
            None => None,
        };
        let update = DogProfileUpdate {
            name: p.name,
            weight_kg: p.weight_kg,
            breed: p.breed,
            activity,
        };

        let mut dog = self.profile.lock().await;
        let result = profile::update_profile(&mut dog, update).map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }

    // --- Dashboard ---

    #[tool(description = "Daily intake dashboard: consumed, goal, remaining, progress, status band and the day's entries")]
    async fn daily_summary(&self, Parameters(p): Parameters<DailySummaryParams>) -> Result<CallToolResult, McpError> {
        let date = parse_date(p.date.as_deref())?;
        let log = self.food_log.lock().await;
        let dog = self.profile.lock().await;
        json_result(&dashboard::daily_summary(&log, &dog, date))
    }

    #[tool(description = "Clear every entry from the session food log")]
    async fn clear_logs(&self) -> Result<CallToolResult, McpError> {
        let mut log = self.food_log.lock().await;
        json_result(&dashboard::clear_logs(&mut log))
    }

    // --- Advice ---

    #[tool(description = "Ask an AI canine nutrition assistant a question, with the dog profile as context. Not a veterinarian.")]
    async fn ask_vet(&self, Parameters(p): Parameters<AskVetParams>) -> Result<CallToolResult, McpError> {
        let dog = self.profile.lock().await.clone();
        let result = advice::ask_vet(self.advice.as_deref(), &p.question, &dog)
            .await
            .map_err(|e| McpError::internal_error(e, None))?;
        json_result(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for PawPalService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "pawpal".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("PawPal Dog Meal Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "PawPal - Dog meal logging, calorie estimation and toxic food screening. \
                 IMPORTANT: Call meal_instructions before logging meals. \
                 Meals: scan_dangerous_foods, estimate_meal (preview), log_typed_meal (free text), log_food (catalog item). \
                 Catalog: list_food_categories, list_foods, get_food. \
                 Profile: get_profile, update_profile. \
                 Dashboard: daily_summary, clear_logs. \
                 Advice: ask_vet (not a veterinarian; send emergencies to a vet). \
                 Status: pawpal_status."
                    .into(),
            ),
        }
    }
}
