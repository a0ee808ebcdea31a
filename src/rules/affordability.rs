//! Affordability: can a seat pay a cost, and what does paying it take?
//!
//! ## Resource costs
//!
//! 1. Per real kind, `missing = max(0, required - own)`.
//! 2. Missing units are summed per class. Base wildcards are subtracted from
//!    the base sum only; advanced wildcards from the advanced sum only.
//! 3. The seat's own mutable pairs cover remaining base shortfalls.
//! 4. If both class sums are `<= 0`, own production suffices.
//! 5. Otherwise every kind still short is offered to the neighbours: if the
//!    left and right neighbours together make at least the missing amount
//!    (counting each neighbour pair toward both of its kinds), the kind is
//!    covered and its class sum drops by that amount.
//! 6. The cost is payable iff both class sums end `<= 0`.
//!
//! Under `TradePolicy::Priced` each covered unit is also bought at the
//! seat's price for that side and class, cheaper side first, and the total
//! must fit in the seat's coins.

use tracing::debug;

use crate::core::{PlayerRing, PlayerState, Seat, Side, TradePolicy};
use crate::resources::{
    Cost, ResourceClass, ResourceCounts, ResourceKind, ResourcePair, RESOURCE_ORDER,
};

/// Coins owed to each neighbour for a trade.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TradeQuote {
    pub left: i32,
    pub right: i32,
}

impl TradeQuote {
    /// Coins owed in total.
    #[must_use]
    pub const fn total(&self) -> i32 {
        self.left + self.right
    }

    fn add(&mut self, side: Side, coins: i32) {
        match side {
            Side::Left => self.left += coins,
            Side::Right => self.right += coins,
        }
    }
}

/// How an affordable cost gets paid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Payment {
    /// A flat coin cost paid to the bank.
    Bank(i32),
    /// Resources from own production, plus any neighbour trade.
    Trade(TradeQuote),
}

impl Payment {
    /// Nothing changes hands.
    pub const NOTHING: Payment = Payment::Trade(TradeQuote { left: 0, right: 0 });
}

/// Check if the player at `seat` can pay `cost`. Pure.
#[must_use]
pub fn can_afford(
    players: &PlayerRing<PlayerState>,
    seat: Seat,
    cost: &Cost,
    policy: TradePolicy,
) -> bool {
    quote(players, seat, cost, policy).is_some()
}

/// Work out how the player at `seat` would pay `cost`. Pure.
///
/// `None` if the cost cannot be paid or the seat is empty.
#[must_use]
pub fn quote(
    players: &PlayerRing<PlayerState>,
    seat: Seat,
    cost: &Cost,
    policy: TradePolicy,
) -> Option<Payment> {
    let player = players.get(seat)?;

    let required = match cost {
        Cost::Coins(coins) => {
            return (*coins <= player.coins).then_some(Payment::Bank(*coins));
        }
        Cost::Resources(required) => required,
    };

    let mut short = Shortfall::own(player, required);
    if short.covered() {
        return Some(Payment::NOTHING);
    }

    let (left, right) = players.neighbors(seat);
    let mut trade = TradeQuote::default();

    for kind in RESOURCE_ORDER.into_iter().filter(|k| k.is_real()) {
        let needed = short.missing.get(kind);
        if needed <= 0 || short.class_remaining(kind.class()) <= 0 {
            continue;
        }

        let from_left = tradeable(left, kind);
        let from_right = tradeable(right, kind);
        if from_left + from_right < needed {
            debug!(%seat, ?kind, needed, from_left, from_right, "neighbours cannot cover shortfall");
            continue;
        }

        short.cover(kind.class(), needed);
        if policy == TradePolicy::Priced {
            buy(player, kind, needed, from_left, from_right, &mut trade);
        }
    }

    if !short.covered() {
        return None;
    }
    if trade.total() > player.coins {
        debug!(%seat, owed = trade.total(), coins = player.coins, "cannot pay neighbours");
        return None;
    }
    Some(Payment::Trade(trade))
}

/// Apply a payment: coins leave the payer and go to the bank or neighbours.
pub fn settle(players: &mut PlayerRing<PlayerState>, seat: Seat, payment: Payment) {
    let n = players.len();
    if !players.contains(seat) {
        return;
    }
    match payment {
        Payment::Bank(coins) => players[seat].coins -= coins,
        Payment::Trade(trade) => {
            players[seat].coins -= trade.total();
            players[seat.left(n)].coins += trade.left;
            players[seat.right(n)].coins += trade.right;
            if trade.total() > 0 {
                debug!(%seat, left = trade.left, right = trade.right, "paid neighbours");
            }
        }
    }
}

/// Units of `kind` a neighbour can offer: production plus matching pairs.
fn tradeable(neighbor: &PlayerState, kind: ResourceKind) -> i32 {
    let from_pairs: i32 = ResourcePair::ALL
        .into_iter()
        .filter(|pair| pair.options().contains(&kind))
        .map(|pair| neighbor.pairs.get(pair))
        .sum();
    neighbor.resources.get(kind) + from_pairs
}

/// Buy `needed` units of `kind`, cheaper side first.
fn buy(
    player: &PlayerState,
    kind: ResourceKind,
    needed: i32,
    from_left: i32,
    from_right: i32,
    trade: &mut TradeQuote,
) {
    let class = kind.class();
    let left_price = player.prices.price(Side::Left, class);
    let right_price = player.prices.price(Side::Right, class);

    let (first, first_stock, first_price, second, second_price) = if left_price <= right_price {
        (Side::Left, from_left, left_price, Side::Right, right_price)
    } else {
        (Side::Right, from_right, right_price, Side::Left, left_price)
    };

    let bought = needed.min(first_stock);
    trade.add(first, bought * first_price);
    trade.add(second, (needed - bought) * second_price);
}

/// Per-kind and per-class shortfall after own production.
struct Shortfall {
    missing: ResourceCounts,
    base: i32,
    advanced: i32,
}

impl Shortfall {
    fn own(player: &PlayerState, required: &ResourceCounts) -> Self {
        let mut missing = ResourceCounts::new();
        for (kind, count) in required.iter().filter(|(k, _)| k.is_real()) {
            missing.set(kind, (count - player.resources.get(kind)).max(0));
        }

        let class_sum = |class: ResourceClass| -> i32 {
            missing
                .iter()
                .filter(|(k, _)| k.class() == class)
                .map(|(_, n)| n)
                .sum()
        };
        let mut short = Self {
            base: class_sum(ResourceClass::Base)
                - player.resources.get(ResourceKind::MutableBase),
            advanced: class_sum(ResourceClass::Advanced)
                - player.resources.get(ResourceKind::MutableAdvanced),
            missing,
        };
        short.apply_pairs(player);
        short
    }

    fn apply_pairs(&mut self, player: &PlayerState) {
        for pair in ResourcePair::ALL {
            let mut available = player.pairs.get(pair);
            if available <= 0 || self.base <= 0 {
                continue;
            }
            for option in pair.options() {
                let needed = self.missing.get(option);
                if needed <= 0 {
                    continue;
                }
                let used = needed.min(available);
                self.missing.add(option, -used);
                self.base -= used;
                available -= used;
                if available == 0 || self.base <= 0 {
                    break;
                }
            }
        }
    }

    fn class_remaining(&self, class: ResourceClass) -> i32 {
        match class {
            ResourceClass::Base => self.base,
            ResourceClass::Advanced => self.advanced,
            ResourceClass::Wildcard => 0,
        }
    }

    fn cover(&mut self, class: ResourceClass, amount: i32) {
        match class {
            ResourceClass::Base => self.base -= amount,
            ResourceClass::Advanced => self.advanced -= amount,
            ResourceClass::Wildcard => {}
        }
    }

    fn covered(&self) -> bool {
        self.base <= 0 && self.advanced <= 0
    }
}
