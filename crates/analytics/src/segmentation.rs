//! Customer spending tiers by lifetime-value quartile.

use serde::Serialize;

use tally_core::{CustomerId, InsufficientData};
use tally_sales::Order;

use crate::revenue::{CustomerValue, customer_lifetime_values};

const TIERS: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Tier {
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl Tier {
    /// Lowest spending tier first.
    pub const ALL: [Tier; TIERS] = [Tier::Bronze, Tier::Silver, Tier::Gold, Tier::Platinum];

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
            Tier::Platinum => "Platinum",
        }
    }
}

impl core::fmt::Display for Tier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TierAssignment {
    pub customer_id: CustomerId,
    pub lifetime_value: f64,
    pub tier: Tier,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierCount {
    pub tier: Tier,
    pub customers: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segmentation {
    Tiered {
        /// Ascending by lifetime value, ties by customer id.
        assignments: Vec<TierAssignment>,
        /// One entry per tier, Bronze first.
        counts: Vec<TierCount>,
    },
    /// Fewer customers than tiers.
    Insufficient(InsufficientData),
}

impl Segmentation {
    pub fn is_tiered(&self) -> bool {
        matches!(self, Segmentation::Tiered { .. })
    }

    /// Tier counts, empty when segmentation was not possible.
    pub fn counts(&self) -> &[TierCount] {
        match self {
            Segmentation::Tiered { counts, .. } => counts.as_slice(),
            Segmentation::Insufficient(_) => &[],
        }
    }
}

/// Split customers with completed orders into four equal-population tiers.
///
/// Customers are ranked by lifetime value (ties by id) and rank `r` of `n`
/// lands in tier `r * 4 / n`, so tier sizes differ by at most one.
pub fn segment_customers(orders: &[Order]) -> Segmentation {
    let mut ranked: Vec<CustomerValue> = customer_lifetime_values(orders);
    if ranked.len() < TIERS {
        tracing::info!(customers = ranked.len(), "too few customers to segment");
        return Segmentation::Insufficient(InsufficientData::new(
            "customer segmentation",
            TIERS,
            ranked.len(),
        ));
    }

    ranked.sort_by(|a, b| {
        a.lifetime_value
            .total_cmp(&b.lifetime_value)
            .then_with(|| a.customer_id.cmp(&b.customer_id))
    });

    let total = ranked.len();
    let mut counts: Vec<TierCount> = Tier::ALL
        .iter()
        .map(|&tier| TierCount { tier, customers: 0 })
        .collect();
    let assignments = ranked
        .into_iter()
        .enumerate()
        .map(|(rank, value)| {
            let index = rank * TIERS / total;
            counts[index].customers += 1;
            TierAssignment {
                customer_id: value.customer_id,
                lifetime_value: value.lifetime_value,
                tier: Tier::ALL[index],
            }
        })
        .collect();

    Segmentation::Tiered {
        assignments,
        counts,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::completed_amounts;

    #[test]
    fn four_distinct_customers_fill_each_tier_once() {
        let segmentation = segment_customers(&completed_amounts(&[40.0, 10.0, 30.0, 20.0]));

        let Segmentation::Tiered { assignments, counts } = &segmentation else {
            panic!("expected tiers, got {segmentation:?}");
        };
        assert!(counts.iter().all(|c| c.customers == 1));
        let tiers: Vec<(&str, Tier)> = assignments
            .iter()
            .map(|a| (a.customer_id.as_str(), a.tier))
            .collect();
        assert_eq!(
            tiers,
            vec![
                ("C-1", Tier::Bronze),
                ("C-3", Tier::Silver),
                ("C-2", Tier::Gold),
                ("C-0", Tier::Platinum),
            ]
        );
    }

    #[test]
    fn tier_sizes_differ_by_at_most_one() {
        let amounts: Vec<f64> = (1..=10).map(f64::from).collect();
        let segmentation = segment_customers(&completed_amounts(&amounts));

        let sizes: Vec<usize> = segmentation.counts().iter().map(|c| c.customers).collect();
        assert_eq!(sizes, vec![3, 2, 3, 2]);
    }

    #[test]
    fn fewer_than_four_customers_is_insufficient() {
        let segmentation = segment_customers(&completed_amounts(&[5.0, 6.0, 7.0]));

        assert!(!segmentation.is_tiered());
        assert!(segmentation.counts().is_empty());
        assert_eq!(
            segmentation,
            Segmentation::Insufficient(InsufficientData::new("customer segmentation", 4, 3))
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// Property: every customer gets a tier and higher tiers never hold lower values.
            #[test]
            fn tiers_are_ordered_by_value(amounts in prop::collection::vec(0u32..1_000, 4..50)) {
                let amounts: Vec<f64> = amounts.into_iter().map(f64::from).collect();
                let segmentation = segment_customers(&completed_amounts(&amounts));

                let Segmentation::Tiered { assignments, counts } = segmentation else {
                    return Err(TestCaseError::fail("expected tiers"));
                };
                prop_assert_eq!(assignments.len(), amounts.len());
                prop_assert_eq!(counts.iter().map(|c| c.customers).sum::<usize>(), amounts.len());
                for pair in assignments.windows(2) {
                    prop_assert!(pair[0].tier <= pair[1].tier);
                    prop_assert!(pair[0].lifetime_value <= pair[1].lifetime_value);
                }
            }
        }
    }
}
