use std::sync::Arc;

use stayrate_core::{CatalogRepository, InventoryLedger, ReservationRepository};
use stayrate_pricing::QuoteService;

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<dyn CatalogRepository>,
    pub inventory: Arc<dyn InventoryLedger>,
    pub reservations: Arc<dyn ReservationRepository>,
    pub quotes: Arc<QuoteService>,
}
