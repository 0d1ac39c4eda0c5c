use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use thriftup_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Money, ProductId, SessionId};
use thriftup_events::Event;
use thriftup_products::Product;

/// Whether the cart itself checks quantity against listed stock.
///
/// Listing pages have historically done this check before calling into the
/// cart, and not always. `Unchecked` keeps the cart permissive; `Enforce`
/// moves the rule inside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockPolicy {
    #[default]
    Unchecked,
    Enforce,
}

/// The two states a shopper can observe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CartState {
    Empty,
    NonEmpty,
}

/// One product and how many of it the shopper wants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Listing as it was when first added.
    pub product: Product,
    /// Always >= 1; a line at zero is removed.
    pub quantity: u32,
}

impl CartLine {
    pub fn product_id(&self) -> &ProductId {
        &self.product.id
    }

    pub fn line_total(&self) -> Money {
        self.product.price.times(self.quantity)
    }
}

/// Aggregate root: the session's cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cart {
    id: SessionId,
    stock_policy: StockPolicy,
    lines: Vec<CartLine>,
    version: u64,
}

impl Cart {
    /// Empty cart for a new session.
    pub fn new(id: SessionId) -> Self {
        Self::with_policy(id, StockPolicy::default())
    }

    pub fn with_policy(id: SessionId, stock_policy: StockPolicy) -> Self {
        Self {
            id,
            stock_policy,
            lines: Vec::new(),
            version: 0,
        }
    }

    pub fn session_id(&self) -> SessionId {
        self.id
    }

    pub fn stock_policy(&self) -> StockPolicy {
        self.stock_policy
    }

    /// Lines in the order products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn state(&self) -> CartState {
        if self.lines.is_empty() {
            CartState::Empty
        } else {
            CartState::NonEmpty
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Sum of `price × quantity` over the current lines, computed on read.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Number of items across all lines.
    pub fn item_count(&self) -> u32 {
        self.lines.iter().fold(0u32, |acc, l| acc.saturating_add(l.quantity))
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> u32 {
        self.line(product_id).map_or(0, |l| l.quantity)
    }

    fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| &l.product.id == product_id)
    }

    /// Add one unit of `product`.
    pub fn add_to_cart(&mut self, product: Product) -> DomainResult<()> {
        let product_id = product.id.clone();
        let cmd = CartCommand::AddToCart(AddToCart {
            session_id: self.id,
            product,
            occurred_at: Utc::now(),
        });
        self.execute(&cmd)?;
        tracing::debug!(
            session = %self.id,
            product = %product_id,
            quantity = self.quantity_of(&product_id),
            "added to cart"
        );
        Ok(())
    }

    /// Remove one unit of `product_id`; unknown ids are ignored.
    pub fn remove_from_cart(&mut self, product_id: &ProductId) -> DomainResult<()> {
        let cmd = CartCommand::RemoveFromCart(RemoveFromCart {
            session_id: self.id,
            product_id: product_id.clone(),
            occurred_at: Utc::now(),
        });
        let events = self.execute(&cmd)?;
        if events.is_empty() {
            tracing::debug!(session = %self.id, product = %product_id, "remove ignored, not in cart");
        } else {
            tracing::debug!(
                session = %self.id,
                product = %product_id,
                quantity = self.quantity_of(product_id),
                "removed from cart"
            );
        }
        Ok(())
    }

    pub fn clear_cart(&mut self) -> DomainResult<()> {
        let cmd = CartCommand::ClearCart(ClearCart {
            session_id: self.id,
            occurred_at: Utc::now(),
        });
        self.execute(&cmd)?;
        tracing::debug!(session = %self.id, "cart cleared");
        Ok(())
    }

    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            session_id: self.id,
            lines: self.lines.clone(),
        }
    }

    /// Rebuild a cart from its line representation.
    ///
    /// Rejects zero quantities and duplicate product lines. The stock policy
    /// is not re-checked: a restored cart keeps what the shopper already had.
    pub fn restore(snapshot: CartSnapshot, stock_policy: StockPolicy) -> DomainResult<Self> {
        let mut cart = Cart::with_policy(snapshot.session_id, stock_policy);
        for line in snapshot.lines {
            if line.quantity == 0 {
                return Err(DomainError::validation(format!(
                    "cart line {} has zero quantity",
                    line.product.id
                )));
            }
            if cart.line(&line.product.id).is_some() {
                return Err(DomainError::conflict(format!(
                    "duplicate cart line for product {}",
                    line.product.id
                )));
            }
            cart.lines.push(line);
        }
        Ok(cart)
    }
}

impl AggregateRoot for Cart {
    type Id = SessionId;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn version(&self) -> u64 {
        self.version
    }
}

/// Serializable line representation of a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub session_id: SessionId,
    pub lines: Vec<CartLine>,
}

/// Command: AddToCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddToCart {
    pub session_id: SessionId,
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveFromCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveFromCart {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearCart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearCart {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartCommand {
    AddToCart(AddToCart),
    RemoveFromCart(RemoveFromCart),
    ClearCart(ClearCart),
}

/// Event: LineAdded (first unit of a product).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineAdded {
    pub session_id: SessionId,
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event payload for quantity moves on an existing line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub session_id: SessionId,
    pub product_id: ProductId,
    /// Quantity after the change.
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineRemoved (last unit of a product taken out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRemoved {
    pub session_id: SessionId,
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: CartCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartCleared {
    pub session_id: SessionId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CartEvent {
    LineAdded(LineAdded),
    QuantityIncreased(QuantityChanged),
    QuantityDecreased(QuantityChanged),
    LineRemoved(LineRemoved),
    CartCleared(CartCleared),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineAdded(_) => "cart.line_added",
            CartEvent::QuantityIncreased(_) => "cart.quantity_increased",
            CartEvent::QuantityDecreased(_) => "cart.quantity_decreased",
            CartEvent::LineRemoved(_) => "cart.line_removed",
            CartEvent::CartCleared(_) => "cart.cleared",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::LineAdded(e) => e.occurred_at,
            CartEvent::QuantityIncreased(e) => e.occurred_at,
            CartEvent::QuantityDecreased(e) => e.occurred_at,
            CartEvent::LineRemoved(e) => e.occurred_at,
            CartEvent::CartCleared(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = DomainError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineAdded(e) => {
                self.lines.push(CartLine {
                    product: e.product.clone(),
                    quantity: 1,
                });
            }
            CartEvent::QuantityIncreased(e) | CartEvent::QuantityDecreased(e) => {
                if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == e.product_id) {
                    line.quantity = e.quantity;
                }
            }
            CartEvent::LineRemoved(e) => {
                self.lines.retain(|l| l.product.id != e.product_id);
            }
            CartEvent::CartCleared(_) => {
                self.lines.clear();
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::AddToCart(cmd) => self.handle_add(cmd),
            CartCommand::RemoveFromCart(cmd) => self.handle_remove(cmd),
            CartCommand::ClearCart(cmd) => self.handle_clear(cmd),
        }
    }
}

impl Cart {
    fn ensure_session(&self, session_id: SessionId) -> Result<(), DomainError> {
        if self.id != session_id {
            return Err(DomainError::invariant("session_id mismatch"));
        }
        Ok(())
    }

    fn handle_add(&self, cmd: &AddToCart) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        let current = self.quantity_of(&cmd.product.id);
        if self.stock_policy == StockPolicy::Enforce && current >= cmd.product.stock {
            return Err(DomainError::invariant(format!(
                "insufficient stock for {}: {} available",
                cmd.product.id, cmd.product.stock
            )));
        }

        if current == 0 {
            return Ok(vec![CartEvent::LineAdded(LineAdded {
                session_id: cmd.session_id,
                product: cmd.product.clone(),
                occurred_at: cmd.occurred_at,
            })]);
        }

        Ok(vec![CartEvent::QuantityIncreased(QuantityChanged {
            session_id: cmd.session_id,
            product_id: cmd.product.id.clone(),
            quantity: current.saturating_add(1),
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveFromCart) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        let event = match self.quantity_of(&cmd.product_id) {
            0 => return Ok(Vec::new()),
            1 => CartEvent::LineRemoved(LineRemoved {
                session_id: cmd.session_id,
                product_id: cmd.product_id.clone(),
                occurred_at: cmd.occurred_at,
            }),
            n => CartEvent::QuantityDecreased(QuantityChanged {
                session_id: cmd.session_id,
                product_id: cmd.product_id.clone(),
                quantity: n - 1,
                occurred_at: cmd.occurred_at,
            }),
        };
        Ok(vec![event])
    }

    fn handle_clear(&self, cmd: &ClearCart) -> Result<Vec<CartEvent>, DomainError> {
        self.ensure_session(cmd.session_id)?;

        if self.lines.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![CartEvent::CartCleared(CartCleared {
            session_id: cmd.session_id,
            occurred_at: cmd.occurred_at,
        })])
    }
}
