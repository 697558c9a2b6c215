use std::fmt;

use crate::activity::ActivityLog;
use crate::config::ScanConfig;
use crate::error::{AbvError, Result};
use crate::models::{Drink, DrinkEntry, SortField, StockedDrink};
use crate::nicknames::NicknameMap;
use crate::scan::{parse_scan, pretty_actor};
use crate::store::SharedStore;
use crate::undo::{Actor, DrinkAction};

/// Pack sizes a single scan may stand for.
pub const QUANTITIES: [u32; 4] = [1, 4, 6, 12];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Scans add stock.
    Stocking,
    /// Scans remove one unit.
    #[default]
    Serving,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Stocking => write!(f, "Stocking"),
            Self::Serving => write!(f, "Serving"),
        }
    }
}

/// What a single line of input did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Stocked { quantity: u32 },
    Served { remaining: i64 },
    /// Known drink scanned while serving, but none left.
    OutOfStock,
    /// Barcode not in the database. In stocking mode the caller should
    /// collect drink details and call [`InventoryController::new_drink`].
    Unknown,
    Undone(bool),
    Redone(bool),
    Ignored,
}

/// Turns scans into inventory actions recorded per input source.
pub struct InventoryController {
    store: SharedStore,
    actor: Actor,
    mode: Mode,
    quantity: u32,
    last_barcode: Option<String>,
    last_id: String,
    scan: ScanConfig,
    nicknames: NicknameMap,
    activity: ActivityLog,
}

impl InventoryController {
    pub fn new(store: SharedStore, scan: ScanConfig, nicknames: NicknameMap) -> Self {
        Self {
            store,
            actor: Actor::new(),
            mode: Mode::default(),
            quantity: 1,
            last_barcode: None,
            last_id: String::new(),
            scan,
            nicknames,
            activity: ActivityLog::default(),
        }
    }

    pub fn store(&self) -> &SharedStore {
        &self.store
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn last_barcode(&self) -> Option<&str> {
        self.last_barcode.as_deref()
    }

    pub fn last_id(&self) -> &str {
        &self.last_id
    }

    pub fn activity(&self) -> &ActivityLog {
        &self.activity
    }

    pub fn activity_mut(&mut self) -> &mut ActivityLog {
        &mut self.activity
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    // ─── Mode / quantity ───────────────────────────────────

    /// Switch modes. Serving always scans single units; stocking starts
    /// from the configured default quantity.
    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        self.quantity = match mode {
            Mode::Serving => 1,
            Mode::Stocking if QUANTITIES.contains(&self.scan.default_quantity) => {
                self.scan.default_quantity
            }
            Mode::Stocking => 1,
        };
        tracing::info!(%mode, "changed mode");
        self.activity.info(format!("Changed to {mode} Mode"));
    }

    pub fn set_quantity(&mut self, quantity: u32) -> Result<()> {
        if !QUANTITIES.contains(&quantity) {
            return Err(AbvError::InvalidQuantity(quantity));
        }
        if quantity != 1 && self.mode != Mode::Stocking {
            self.activity
                .info("Serving of multiple drinks at once is not supported");
            return Err(AbvError::MultiServeUnsupported);
        }
        if quantity != self.quantity {
            self.quantity = quantity;
            tracing::info!(quantity, "changed quantity per scan");
            self.activity
                .info(format!("Quantity of drinks per scan changed to {quantity}"));
        }
        Ok(())
    }

    // ─── Scans ─────────────────────────────────────────────

    /// Handle one raw input line: an undo/redo code or a barcode, with an
    /// optional scanner prefix.
    pub fn handle_scan(&mut self, line: &str) -> Result<ScanOutcome> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Ok(ScanOutcome::Ignored);
        }

        let (id, barcode) = parse_scan(line);
        if barcode.is_empty() {
            return Ok(ScanOutcome::Ignored);
        }
        if !self.scan.undo_barcode.is_empty() && barcode == self.scan.undo_barcode {
            return self.undo(id).map(ScanOutcome::Undone);
        }
        if !self.scan.redo_barcode.is_empty() && barcode == self.scan.redo_barcode {
            return self.redo(id).map(ScanOutcome::Redone);
        }

        tracing::debug!(barcode, actor = id, "scanned barcode");
        self.activity
            .debug(format!("Scanned barcode: {barcode}{}", pretty_actor(id)));
        let outcome = self.handle_barcode(id, barcode)?;

        if outcome == ScanOutcome::Unknown {
            match self.mode {
                Mode::Stocking => self
                    .activity
                    .info("Barcode not recognized. Please enter drink brand and name."),
                Mode::Serving => self
                    .activity
                    .warn("Barcode not recognized while serving. Drink will not be recorded"),
            }
        }
        Ok(outcome)
    }

    /// Stock or serve a known barcode under the current mode. An empty
    /// barcode is ignored and not cached for [`new_drink`](Self::new_drink).
    pub fn handle_barcode(&mut self, id: &str, barcode: &str) -> Result<ScanOutcome> {
        if barcode.is_empty() {
            return Ok(ScanOutcome::Ignored);
        }
        self.last_barcode = Some(barcode.to_string());
        self.last_id = id.to_string();

        let Some(drink) = self.store.drink_by_barcode(barcode)? else {
            return Ok(ScanOutcome::Unknown);
        };
        tracing::info!(barcode, actor = id, "known barcode scanned");

        let entry = DrinkEntry::new(barcode, self.quantity);
        match self.mode {
            Mode::Stocking => {
                let quantity = entry.quantity;
                self.actor
                    .add_action(id, DrinkAction::stock_input(self.store.clone(), entry))?;
                self.activity.info(format!(
                    "Drink added to inventory!\n  #:     {quantity}\n  Name:  {}\n  Brand: {}",
                    drink.name, drink.brand
                ));
                Ok(ScanOutcome::Stocked { quantity })
            }
            Mode::Serving => {
                if self.store.count_by_barcode(barcode)? <= 0 {
                    tracing::warn!(barcode, "drink not in inventory");
                    self.activity.warn(format!(
                        "That drink was not in the inventory!\n  Name:  {}\n  Brand: {}",
                        drink.name, drink.brand
                    ));
                    return Ok(ScanOutcome::OutOfStock);
                }
                self.actor
                    .add_action(id, DrinkAction::stock_output(self.store.clone(), entry))?;
                let remaining = self.store.count_by_barcode(barcode)?;
                self.activity.info(format!(
                    "Drink removed from inventory!\n  Name:  {}\n  Brand: {}\n  Remaining: {remaining}",
                    drink.name, drink.brand
                ));
                Ok(ScanOutcome::Served { remaining })
            }
        }
    }

    /// Create the drink for the last unknown barcode and stock it with the
    /// current quantity, as one undoable entry of the scanning actor.
    pub fn new_drink(&mut self, mut drink: Drink) -> Result<()> {
        if self.mode != Mode::Stocking {
            return Err(AbvError::WrongMode {
                operation: "new_drink",
                required: Mode::Stocking,
            });
        }

        if drink.barcode.is_empty() {
            drink.barcode = self
                .last_barcode
                .clone()
                .ok_or(AbvError::NoPendingBarcode)?;
        }
        self.nicknames.apply(&mut drink);

        let id = self.last_id.clone();
        let quantity = self.quantity;
        let (name, brand) = (drink.name.clone(), drink.brand.clone());
        tracing::debug!(barcode = %drink.barcode, actor = %id, "adding new drink");

        self.actor.add_action(
            &id,
            DrinkAction::create_and_stock(self.store.clone(), drink, quantity),
        )?;
        self.activity.info(format!(
            "Drink created and added to inventory!\n  #:     {quantity}\n  Name:  {name}\n  Brand: {brand}"
        ));
        Ok(())
    }

    // ─── Undo / redo ───────────────────────────────────────

    pub fn undo(&mut self, id: &str) -> Result<bool> {
        let acted = self.actor.undo(id)?;
        if acted {
            tracing::info!(actor = id, "reverted last action");
            self.activity
                .info(format!("Reverted last action{}", pretty_actor(id)));
        }
        Ok(acted)
    }

    pub fn redo(&mut self, id: &str) -> Result<bool> {
        let acted = self.actor.redo(id)?;
        if acted {
            tracing::info!(actor = id, "redid last action");
            self.activity
                .info(format!("Redid last action{}", pretty_actor(id)));
        }
        Ok(acted)
    }

    // ─── Reads ─────────────────────────────────────────────

    pub fn inventory(&self) -> Result<Vec<StockedDrink>> {
        self.store.inventory()
    }

    pub fn inventory_sorted(&self, fields: &[SortField]) -> Result<Vec<StockedDrink>> {
        self.store.inventory_sorted(fields)
    }

    pub fn totals(&self) -> Result<(i64, i64)> {
        Ok((
            self.store.inventory_total_quantity()?,
            self.store.inventory_total_variety()?,
        ))
    }
}
