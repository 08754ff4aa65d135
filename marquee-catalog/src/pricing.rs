use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike, Weekday};
use marquee_shared::{CinemaClass, ShowType, TicketTier};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};

/// Hour of day from which Thursday and Friday shows charge peak pricing.
const PEAK_EVENING_HOUR: u32 = 18;

/// Mutable pricing configuration, persisted as a single record. All amounts
/// are cents; surcharges may be negative (discount tiers). A surcharge map
/// without an entry contributes zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceScheme {
    pub base_adult_cents: i32,
    pub blockbuster_surcharge_cents: i32,
    pub show_type_surcharge: HashMap<ShowType, i32>,
    pub class_surcharge: HashMap<CinemaClass, i32>,
    pub tier_surcharge: HashMap<TicketTier, i32>,
    pub holidays: BTreeSet<NaiveDate>,
}

impl Default for PriceScheme {
    fn default() -> Self {
        Self {
            base_adult_cents: 1300,
            blockbuster_surcharge_cents: 200,
            show_type_surcharge: HashMap::from([(ShowType::ThreeDimensional, 300)]),
            class_surcharge: HashMap::from([(CinemaClass::Premium, 500)]),
            tier_surcharge: HashMap::from([
                (TicketTier::Student, -300),
                (TicketTier::Senior, -500),
                (TicketTier::Peak, 200),
                (TicketTier::SuperPeak, 400),
            ]),
            holidays: BTreeSet::new(),
        }
    }
}

impl PriceScheme {
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns whether the date was newly added.
    pub fn add_holiday(&mut self, date: NaiveDate) -> bool {
        self.holidays.insert(date)
    }

    /// Returns whether the date was present.
    pub fn remove_holiday(&mut self, date: NaiveDate) -> bool {
        self.holidays.remove(&date)
    }
}

/// Resolves surcharge tiers and computes ticket prices against one scheme.
pub struct PricingEngine {
    scheme: PriceScheme,
}

impl PricingEngine {
    pub fn new(scheme: PriceScheme) -> Self {
        Self { scheme }
    }

    /// Forced tier overrides, in precedence order: Thursday/Friday evening
    /// shows are `Peak`, weekend and holiday shows are `SuperPeak`, anything
    /// else keeps the requested tier. The override is authoritative; callers
    /// must resolve before showing a price.
    pub fn resolve_tier(&self, starts_at: NaiveDateTime, requested: TicketTier) -> TicketTier {
        let weekday = starts_at.weekday();
        if matches!(weekday, Weekday::Thu | Weekday::Fri) && starts_at.hour() >= PEAK_EVENING_HOUR {
            return TicketTier::Peak;
        }
        if matches!(weekday, Weekday::Sat | Weekday::Sun) || self.scheme.is_holiday(starts_at.date())
        {
            return TicketTier::SuperPeak;
        }
        requested
    }

    /// Price of one ticket: base, plus blockbuster / show-type / cinema-class
    /// surcharges, plus the surcharge of the resolved tier.
    pub fn unit_price(
        &self,
        blockbuster: bool,
        show_type: ShowType,
        class: CinemaClass,
        requested: TicketTier,
        starts_at: NaiveDateTime,
    ) -> i32 {
        let mut cents = self.scheme.base_adult_cents;
        if blockbuster {
            cents += self.scheme.blockbuster_surcharge_cents;
        }
        cents += self.surcharge(&self.scheme.show_type_surcharge, &show_type);
        cents += self.surcharge(&self.scheme.class_surcharge, &class);
        let tier = self.resolve_tier(starts_at, requested);
        cents += self.surcharge(&self.scheme.tier_surcharge, &tier);
        cents
    }

    /// Unit price times seat count; zero for an empty booking.
    pub fn total_price(
        &self,
        blockbuster: bool,
        show_type: ShowType,
        class: CinemaClass,
        requested: TicketTier,
        starts_at: NaiveDateTime,
        seat_count: usize,
    ) -> i32 {
        if seat_count == 0 {
            return 0;
        }
        self.unit_price(blockbuster, show_type, class, requested, starts_at) * seat_count as i32
    }

    fn surcharge<K: std::hash::Hash + Eq>(&self, map: &HashMap<K, i32>, key: &K) -> i32 {
        map.get(key).copied().unwrap_or(0)
    }
}
