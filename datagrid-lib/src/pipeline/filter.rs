//! Filter stage

use log::debug;
use log::warn;

use crate::filter::FilterEvaluator;
use crate::filter::FilterFault;
use crate::filter::FilterSet;
use crate::model::Column;
use crate::model::TableRow;

/// Output of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterOutcome {
    /// Indices into the row collection that passed, in input order.
    pub indices: Vec<usize>,
    /// Summary of comparator failures, if any rule failed.
    pub fault: Option<FilterFault>,
}

/// Filters `order` (row indices, typically the sort stage output).
///
/// The relative order of `order` is kept. Comparator failures exclude the
/// row for the failing rule; the pass always runs to completion.
pub fn filter_indices<R: TableRow>(
    rows: &[R],
    order: &[usize],
    filters: &FilterSet,
    columns: &[Column],
) -> FilterOutcome {
    if filters.is_empty() {
        return FilterOutcome {
            indices: order.to_vec(),
            fault: None,
        };
    }

    let evaluator = FilterEvaluator::new(filters, columns);
    let mut fault = None;
    let indices: Vec<usize> = order
        .iter()
        .copied()
        .filter(|&i| {
            let evaluation = evaluator.evaluate(&rows[i]);
            FilterFault::record(&mut fault, &evaluation.failures);
            evaluation.matched
        })
        .collect();

    debug!(
        "[filter] {} of {} rows match {} rule(s) ({})",
        indices.len(),
        order.len(),
        filters.len(),
        filters.logic
    );
    if let Some(fault) = &fault {
        warn!("[filter] {}", fault);
    }

    FilterOutcome { indices, fault }
}
