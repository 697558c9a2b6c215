pub mod async_tasks;

use abv_core::{
    AbvError, AppConfig, Drink, InventoryController, MessageLevel, Mode, ScanOutcome, SortField,
    StockedDrink,
};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::popup::Popup;
use crate::theme::NordTheme;
use async_tasks::{AsyncResultType, Services};

/// Keyboard actor id for keys that undo/redo.
const KEYBOARD: &str = abv_core::scan::KEYBOARD_ACTOR;

/// Main application state.
pub struct App {
    pub controller: InventoryController,
    pub config: AppConfig,
    pub theme: NordTheme,

    /// Text typed or scanned since the last Enter.
    pub input: String,
    pub inventory: Vec<StockedDrink>,
    pub total_quantity: i64,
    pub total_variety: i64,
    /// First visible row of the stock panel.
    pub stock_scroll: usize,

    pub popup: Option<Popup>,
    /// Error dialog text; dismissed with Esc.
    pub error: Option<String>,
    pub verbose: bool,
    pub should_quit: bool,

    services: Option<Services>,
    tx: UnboundedSender<AsyncResultType>,
    rx: UnboundedReceiver<AsyncResultType>,
}

impl App {
    pub fn new(controller: InventoryController, config: AppConfig) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            controller,
            config,
            theme: NordTheme::default(),
            input: String::new(),
            inventory: Vec::new(),
            total_quantity: 0,
            total_variety: 0,
            stock_scroll: 0,
            popup: None,
            error: None,
            verbose: false,
            should_quit: false,
            services: None,
            tx,
            rx,
        }
    }

    /// Enable catalog search and label caching.
    pub fn with_services(mut self, services: Services) -> Self {
        self.services = Some(services);
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn mode(&self) -> Mode {
        self.controller.mode()
    }

    /// Lowest message level shown in the log panel.
    pub fn log_level(&self) -> MessageLevel {
        if self.verbose {
            MessageLevel::Debug
        } else {
            MessageLevel::Info
        }
    }

    fn log_error(&mut self, context: &str, err: impl std::fmt::Display) {
        tracing::error!(error = %err, "{context}");
        self.controller
            .activity_mut()
            .error(format!("{context}: {err}"));
    }

    // ─── Inventory ─────────────────────────────────────────

    pub fn refresh_inventory(&mut self) {
        match self
            .controller
            .inventory_sorted(&[SortField::Brand, SortField::Name])
        {
            Ok(inventory) => self.inventory = inventory,
            Err(e) => self.log_error("Error getting current inventory", e),
        }
        match self.controller.totals() {
            Ok((quantity, variety)) => {
                self.total_quantity = quantity;
                self.total_variety = variety;
            }
            Err(e) => self.log_error("Error getting inventory totals", e),
        }
        self.stock_scroll = self.stock_scroll.min(self.inventory.len().saturating_sub(1));
    }

    pub fn scroll_stock(&mut self, delta: isize) {
        let max = self.inventory.len().saturating_sub(1);
        self.stock_scroll = self.stock_scroll.saturating_add_signed(delta).min(max);
    }

    // ─── Prompt ────────────────────────────────────────────

    pub fn paste(&mut self, text: &str) {
        match self.popup.as_mut() {
            Some(Popup::Search { query }) => query.push_str(text.trim_end_matches(['\r', '\n'])),
            Some(_) => {}
            None => {
                for line in text.split_inclusive('\n') {
                    self.input.push_str(line.trim_end_matches(['\r', '\n']));
                    if line.ends_with('\n') {
                        self.submit_input();
                    }
                }
            }
        }
    }

    /// Handle the prompt line as a scan.
    pub fn submit_input(&mut self) {
        let line = std::mem::take(&mut self.input);
        match self.controller.handle_scan(&line) {
            Ok(ScanOutcome::Unknown) if self.mode() == Mode::Stocking => {
                self.popup = Some(Popup::search());
            }
            Ok(_) => {}
            Err(e) => self.log_error("Failed to record barcode", e),
        }
        self.refresh_inventory();
    }

    pub fn set_mode(&mut self, mode: Mode) {
        self.controller.set_mode(mode);
    }

    pub fn set_quantity(&mut self, quantity: u32) {
        match self.controller.set_quantity(quantity) {
            Ok(()) | Err(AbvError::MultiServeUnsupported) => {}
            Err(e) => self.log_error("Could not change quantity", e),
        }
    }

    pub fn undo(&mut self) {
        if let Err(e) = self.controller.undo(KEYBOARD) {
            self.log_error("Could not undo last action", e);
        }
        self.refresh_inventory();
    }

    pub fn redo(&mut self) {
        if let Err(e) = self.controller.redo(KEYBOARD) {
            self.log_error("Could not redo last action", e);
        }
        self.refresh_inventory();
    }

    // ─── New drink popup ───────────────────────────────────

    pub fn cancel_popup(&mut self) {
        let message = match self.popup.take() {
            Some(Popup::Results { .. }) => "Canceled selecting drink from list",
            Some(_) => "Canceled entering information for new barcode",
            None => return,
        };
        self.controller.activity_mut().info(message);
    }

    /// Send the typed name to the catalog.
    pub fn start_search(&mut self) {
        let Some(Popup::Search { query }) = self.popup.as_ref() else {
            return;
        };
        let query = query.trim().to_string();
        if query.is_empty() {
            return;
        }
        tracing::info!(entry = %query, "user searched for a drink");

        let Some(services) = self.services.as_ref() else {
            self.error = Some("Drink search is not available".to_string());
            return;
        };
        async_tasks::spawn_search(services, self.tx.clone(), query.clone());
        self.popup = Some(Popup::Searching { query });
    }

    /// Create the highlighted catalog drink under the last scanned barcode.
    pub fn select_drink(&mut self) {
        let Some(drink) = self.popup.as_ref().and_then(Popup::selected_drink).cloned() else {
            return;
        };
        self.popup = None;
        self.controller
            .activity_mut()
            .debug(format!("You selected: {}", crate::popup::result_label(&drink)));
        self.create_drink(drink);
    }

    pub fn create_drink(&mut self, drink: Drink) {
        if !drink.logo.is_empty()
            && let Some(services) = self.services.as_ref()
        {
            async_tasks::spawn_image_cache(services, self.tx.clone(), drink.logo.clone());
        }

        if let Err(e) = self.controller.new_drink(drink) {
            self.log_error("Could not create drink", e);
        }
        self.refresh_inventory();
    }

    // ─── Background results ────────────────────────────────

    pub fn poll_async(&mut self) {
        while let Ok(result) = self.rx.try_recv() {
            self.handle_async(result);
        }
    }

    pub fn handle_async(&mut self, result: AsyncResultType) {
        match result {
            AsyncResultType::SearchFinished { query, results } => {
                // The popup may have been cancelled meanwhile.
                if !matches!(&self.popup, Some(Popup::Searching { query: q }) if *q == query) {
                    return;
                }
                match results {
                    Ok(drinks) if drinks.is_empty() => {
                        self.controller
                            .activity_mut()
                            .info(format!("No drinks found for \"{query}\""));
                        self.popup = Some(Popup::Search { query });
                    }
                    Ok(drinks) => {
                        self.popup = Some(Popup::Results { drinks, selected: 0 });
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "drink search failed");
                        self.error = Some(e);
                        self.popup = Some(Popup::Search { query });
                    }
                }
            }
            AsyncResultType::ImageCached { url, result } => {
                if let Err(e) = result {
                    self.log_error(&format!("Failed caching image {url}"), e);
                }
            }
        }
    }
}
