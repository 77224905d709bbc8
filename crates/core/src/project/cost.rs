//! Derived cost report for a single project.
//!
//! Amounts are summed as given; no currency conversion is attempted. The
//! headline `currency` is the first yarn line's currency (EUR when there are
//! no yarns), which says nothing useful once currencies are mixed, so the
//! report also carries per-currency totals in `currencies`.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;

use crate::catalog::YarnSummary;
use crate::enums::{CostCategory, QuantityUnit};
use crate::project::document::Project;
use crate::types::{Date, DocId};
use crate::validation::DEFAULT_CURRENCY;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostSummary {
    pub yarn_cost: f64,
    pub additional_cost: f64,
    pub total_cost: f64,
    pub currency: String,
    pub currencies: Vec<CurrencyTotal>,
    pub breakdown: CostBreakdown,
}

/// Totals restricted to the line items in one currency.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrencyTotal {
    pub currency: String,
    pub yarn_cost: f64,
    pub additional_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub yarns: Vec<YarnCostLine>,
    pub additional: Vec<AdditionalCostLine>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YarnCostLine {
    pub yarn_id: DocId,
    pub yarn_name: Option<String>,
    pub quantity: f64,
    pub unit: QuantityUnit,
    pub cost_per_unit: Option<f64>,
    pub currency: String,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AdditionalCostLine {
    pub description: String,
    pub amount: f64,
    pub currency: String,
    pub category: Option<CostCategory>,
    pub purchase_date: Option<Date>,
}

impl CostSummary {
    /// Build the report. `yarns` supplies display names for yarn lines.
    pub fn compute(project: &Project, yarns: &HashMap<DocId, YarnSummary>) -> Self {
        let yarn_lines: Vec<YarnCostLine> = project
            .yarns_used
            .iter()
            .map(|usage| YarnCostLine {
                yarn_id: usage.yarn_id,
                yarn_name: yarns.get(&usage.yarn_id).map(|y| y.name.clone()),
                quantity: usage.quantity_used,
                unit: usage.quantity_unit,
                cost_per_unit: usage.cost_per_unit,
                currency: usage.currency.clone(),
                total: usage.line_total(),
            })
            .collect();

        let additional_lines: Vec<AdditionalCostLine> = project
            .additional_costs
            .iter()
            .map(|cost| AdditionalCostLine {
                description: cost.description.clone(),
                amount: cost.amount,
                currency: cost.currency.clone(),
                category: cost.category,
                purchase_date: cost.purchase_date,
            })
            .collect();

        let mut by_currency: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        for line in &yarn_lines {
            by_currency.entry(&line.currency).or_default().0 += line.total;
        }
        for line in &additional_lines {
            by_currency.entry(&line.currency).or_default().1 += line.amount;
        }
        let currencies = by_currency
            .into_iter()
            .map(|(currency, (yarn_cost, additional_cost))| CurrencyTotal {
                currency: currency.to_string(),
                yarn_cost,
                additional_cost,
                total_cost: yarn_cost + additional_cost,
            })
            .collect();

        let yarn_cost = project.total_yarn_cost();
        let additional_cost = project.total_additional_cost();

        Self {
            yarn_cost,
            additional_cost,
            total_cost: yarn_cost + additional_cost,
            currency: project
                .yarns_used
                .first()
                .map(|usage| usage.currency.clone())
                .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            currencies,
            breakdown: CostBreakdown {
                yarns: yarn_lines,
                additional: additional_lines,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enums::ProjectType;
    use crate::project::input::{CreateProject, NewCost, NewYarnUsage};
    use chrono::Utc;
    use uuid::Uuid;

    fn cost(amount: f64, currency: Option<&str>) -> NewCost {
        NewCost {
            description: "Pattern".into(),
            amount,
            currency: currency.map(str::to_string),
            category: Some(CostCategory::Pattern),
            purchase_date: None,
            notes: None,
        }
    }

    fn priced_yarn(quantity: f64, price: f64, currency: &str) -> NewYarnUsage {
        let mut usage = NewYarnUsage::new(Uuid::new_v4(), quantity);
        usage.cost_per_unit = Some(price);
        usage.currency = Some(currency.to_string());
        usage
    }

    fn empty_project() -> Project {
        Project::create(CreateProject::new("Cardigan", ProjectType::Knitting), Utc::now()).unwrap()
    }

    #[test]
    fn sums_yarn_and_additional_costs() {
        let mut project = empty_project();
        project.add_yarn(priced_yarn(2.0, 10.0, "EUR")).unwrap();
        project.add_yarn(priced_yarn(3.0, 5.0, "EUR")).unwrap();
        project.add_cost(cost(7.0, None), Utc::now()).unwrap();

        let summary = CostSummary::compute(&project, &HashMap::new());
        assert_eq!(summary.yarn_cost, 35.0);
        assert_eq!(summary.additional_cost, 7.0);
        assert_eq!(summary.total_cost, 42.0);
        assert_eq!(summary.breakdown.yarns[0].total, 20.0);
        assert_eq!(summary.breakdown.yarns[1].total, 15.0);
        assert_eq!(summary.breakdown.additional[0].amount, 7.0);
    }

    #[test]
    fn no_yarns_defaults_currency_to_eur() {
        let mut project = empty_project();
        project.add_cost(cost(15.0, Some("GBP")), Utc::now()).unwrap();

        let summary = CostSummary::compute(&project, &HashMap::new());
        assert_eq!(summary.yarn_cost, 0.0);
        assert_eq!(summary.total_cost, 15.0);
        assert_eq!(summary.currency, "EUR");
        assert!(summary.breakdown.yarns.is_empty());
    }

    #[test]
    fn currency_follows_first_yarn() {
        let mut project = empty_project();
        project.add_yarn(priced_yarn(1.0, 8.0, "usd")).unwrap();
        project.add_yarn(priced_yarn(1.0, 8.0, "EUR")).unwrap();

        let summary = CostSummary::compute(&project, &HashMap::new());
        assert_eq!(summary.currency, "USD");
    }

    #[test]
    fn mixed_currencies_are_broken_out() {
        let mut project = empty_project();
        project.add_yarn(priced_yarn(2.0, 4.0, "USD")).unwrap();
        project.add_yarn(priced_yarn(1.0, 6.0, "EUR")).unwrap();
        project.add_cost(cost(3.0, Some("EUR")), Utc::now()).unwrap();

        let summary = CostSummary::compute(&project, &HashMap::new());
        assert_eq!(summary.currencies.len(), 2);
        let eur = &summary.currencies[0];
        assert_eq!(eur.currency, "EUR");
        assert_eq!(eur.yarn_cost, 6.0);
        assert_eq!(eur.additional_cost, 3.0);
        assert_eq!(eur.total_cost, 9.0);
        let usd = &summary.currencies[1];
        assert_eq!(usd.currency, "USD");
        assert_eq!(usd.total_cost, 8.0);
    }

    #[test]
    fn yarn_lines_carry_resolved_names() {
        let mut project = empty_project();
        let usage = NewYarnUsage::new(Uuid::new_v4(), 1.0);
        let yarn_id = usage.yarn_id;
        project.add_yarn(usage).unwrap();

        let mut names = HashMap::new();
        names.insert(
            yarn_id,
            YarnSummary {
                id: yarn_id,
                name: "Sock Yarn".into(),
                brand: None,
                yarn_type: None,
                color: None,
            },
        );

        let summary = CostSummary::compute(&project, &names);
        assert_eq!(summary.breakdown.yarns[0].yarn_name.as_deref(), Some("Sock Yarn"));
        assert_eq!(summary.breakdown.yarns[0].cost_per_unit, None);
        assert_eq!(summary.breakdown.yarns[0].total, 0.0);
    }
}
