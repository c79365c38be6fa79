//! Scenario and property tests for the debt simplifier and balance views.

use std::collections::HashMap;

use proptest::prelude::*;
use rstest::rstest;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use paise_core::balances::{pairwise_net, summarize_balances};
use paise_core::models::balance::BalanceRow;
use paise_core::models::settlement::SettlementPayment;
use paise_core::settle::simplify_group_debts;

mod common;

use common::balance_row;

const BALANCE_ROWS_JSON: &str = include_str!("fixtures/balance_rows.json");

fn triples(plan: &[SettlementPayment]) -> Vec<(String, String, Decimal)> {
    plan.iter()
        .map(|p| (p.from.id.clone(), p.to.id.clone(), p.amount))
        .collect()
}

/// Folds rows into per-user nets the same way the simplifier does.
fn nets_of(rows: &[BalanceRow]) -> HashMap<String, Decimal> {
    let mut nets: HashMap<String, Decimal> = HashMap::new();
    for row in rows {
        *nets.entry(row.user_a_id.clone()).or_default() += row.amount;
        *nets.entry(row.user_b_id.clone()).or_default() -= row.amount;
    }
    nets
}

/// Applies a plan to the nets: payers rise toward zero, receivers fall.
fn apply_plan(nets: &mut HashMap<String, Decimal>, plan: &[SettlementPayment]) {
    for payment in plan {
        *nets.entry(payment.from.id.clone()).or_default() += payment.amount;
        *nets.entry(payment.to.id.clone()).or_default() -= payment.amount;
    }
}

#[rstest]
#[case::single_debt(
    vec![("a", "b", dec!(60.00))],
    vec![("b", "a", dec!(60.00))]
)]
#[case::one_creditor_two_debtors(
    vec![("a", "b", dec!(60.00)), ("a", "c", dec!(40.00))],
    vec![("b", "a", dec!(60.00)), ("c", "a", dec!(40.00))]
)]
#[case::chain_shortcut(
    vec![("a", "b", dec!(50.00)), ("b", "c", dec!(50.00))],
    vec![("c", "a", dec!(50.00))]
)]
#[case::already_settled(
    vec![("a", "b", dec!(30.00)), ("a", "b", dec!(-30.00))],
    vec![]
)]
fn simplify_scenarios(
    #[case] rows: Vec<(&str, &str, Decimal)>,
    #[case] expected: Vec<(&str, &str, Decimal)>,
) {
    let rows: Vec<BalanceRow> = rows
        .into_iter()
        .map(|(a, b, amount)| balance_row(a, b, Some("g1"), amount))
        .collect();
    let expected: Vec<(String, String, Decimal)> = expected
        .into_iter()
        .map(|(from, to, amount)| (from.to_string(), to.to_string(), amount))
        .collect();
    assert_eq!(triples(&simplify_group_debts(&rows)), expected);
}

#[test]
fn fixture_rows_simplify_deterministically() {
    let rows: Vec<BalanceRow> = serde_json::from_str(BALANCE_ROWS_JSON).unwrap();
    // Nets: anita +100.00, bela -72.50, chetan -27.50
    let plan = simplify_group_debts(&rows);
    assert_eq!(
        triples(&plan),
        vec![
            ("usr_bela".to_string(), "usr_anita".to_string(), dec!(72.50)),
            ("usr_chetan".to_string(), "usr_anita".to_string(), dec!(27.50)),
        ]
    );
    // Display refs are retained from the rows
    assert_eq!(plan[0].to.name, "Anita");
}

#[test]
fn plan_size_bounded_by_party_count() {
    // Nets: a +100, b -60, c -40; at most numUsers - 1 payments
    let rows = vec![
        balance_row("a", "b", Some("g1"), dec!(60.00)),
        balance_row("a", "c", Some("g1"), dec!(40.00)),
    ];
    let plan = simplify_group_debts(&rows);
    assert!(plan.len() <= 2);
    for payment in &plan {
        assert!(payment.amount > Decimal::ZERO);
    }
}

#[test]
fn summary_matches_fixture_rows() {
    let rows: Vec<BalanceRow> = serde_json::from_str(BALANCE_ROWS_JSON).unwrap();

    let anita = summarize_balances("usr_anita", &rows);
    assert_eq!(anita.net_balance, dec!(100.00));
    assert!(anita.you_owe.is_empty());
    assert_eq!(anita.you_are_owed.len(), 2);

    let chetan = summarize_balances("usr_chetan", &rows);
    // Owes anita 40.00 from the group, is owed 12.50 by bela directly
    assert_eq!(chetan.net_balance, dec!(-27.50));
    assert_eq!(chetan.you_owe[0].user.id, "usr_anita");
    assert_eq!(chetan.you_owe[0].amount, dec!(40.00));
    assert_eq!(chetan.you_are_owed[0].user.id, "usr_bela");
    assert_eq!(chetan.you_are_owed[0].amount, dec!(12.50));

    assert_eq!(pairwise_net("usr_chetan", "usr_bela", &rows), dec!(12.50));
}

proptest! {
    /// Applying the plan settles every user to within one cent.
    #[test]
    fn plan_closes_all_nets(
        amounts in prop::collection::vec(-100_000i64..=100_000, 1..=20),
        pair_indexes in prop::collection::vec((0usize..=5, 0usize..=5), 1..=20),
    ) {
        let rows: Vec<BalanceRow> = amounts
            .iter()
            .zip(&pair_indexes)
            .filter(|&(_, &(x, y))| x != y)
            .map(|(&cents, &(x, y))| {
                let (a, b) = (x.min(y), x.max(y));
                balance_row(
                    &format!("u{a}"),
                    &format!("u{b}"),
                    Some("g1"),
                    Decimal::new(cents, 2),
                )
            })
            .collect();

        let plan = simplify_group_debts(&rows);
        let mut nets = nets_of(&rows);
        apply_plan(&mut nets, &plan);
        for (user, net) in &nets {
            prop_assert!(
                net.abs() < dec!(0.01),
                "user {} left with residue {}",
                user,
                net
            );
        }
    }

    /// Same snapshot, same plan.
    #[test]
    fn simplify_is_idempotent(
        amounts in prop::collection::vec(-50_000i64..=50_000, 1..=12),
        pair_indexes in prop::collection::vec((0usize..=4, 0usize..=4), 1..=12),
    ) {
        let rows: Vec<BalanceRow> = amounts
            .iter()
            .zip(&pair_indexes)
            .filter(|&(_, &(x, y))| x != y)
            .map(|(&cents, &(x, y))| {
                let (a, b) = (x.min(y), x.max(y));
                balance_row(
                    &format!("u{a}"),
                    &format!("u{b}"),
                    None,
                    Decimal::new(cents, 2),
                )
            })
            .collect();

        let first = simplify_group_debts(&rows);
        let second = simplify_group_debts(&rows);
        prop_assert_eq!(triples(&first), triples(&second));
    }

    /// The summary's net always equals the sum of its two lists, signed.
    #[test]
    fn summary_lists_reconcile_with_net(
        amounts in prop::collection::vec(-100_000i64..=100_000, 0..=15),
        others in prop::collection::vec(1usize..=5, 0..=15),
    ) {
        let rows: Vec<BalanceRow> = amounts
            .iter()
            .zip(&others)
            .map(|(&cents, &other)| {
                balance_row("u0", &format!("u{other}"), None, Decimal::new(cents, 2))
            })
            .collect();

        let summary = summarize_balances("u0", &rows);
        let owed: Decimal = summary.you_are_owed.iter().map(|c| c.amount).sum();
        let owing: Decimal = summary.you_owe.iter().map(|c| c.amount).sum();
        prop_assert_eq!(summary.net_balance, owed - owing);
    }
}
