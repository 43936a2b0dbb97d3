mod harness;

use harness::*;
use liquidity_gauge::errors::GaugeError;

const START: u64 = 2_000 * WEEK;

fn point_gauge() -> TestGauge {
    TestGauge::with_points(START, scaled(10_000, 18), exp10(17))
}

#[test]
fn test_deploy_epoch_uses_initial_rate() {
    let mut g = point_gauge();
    let alice = address(1);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK);
    g.checkpoint(&alice);

    let user = g.user(&alice);
    assert_eq!(user.point_fraction, big(10_000 * WEEK));
    assert_eq!(g.store.gauge.point.rate_epoch, 2_000);
    g.assert_conservation();
}

#[test]
fn test_next_epoch_streams_proportion_of_deposits() {
    let mut g = point_gauge();
    let alice = address(1);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK);
    g.checkpoint(&alice);
    let at_boundary = g.user(&alice).point_fraction;

    g.env.sleep(WEEK / 2);
    g.checkpoint(&alice);
    let earned = g.user(&alice).point_fraction - &at_boundary;

    // a tenth of the deposits per week, for half a week
    assert_close(&earned, &scaled(5, 19), 1, 10_000);
    assert_eq!(g.store.gauge.point.rate_epoch, 2_001);
    g.assert_conservation();
}

#[test]
fn test_point_balance_and_total_supply() {
    let mut g = point_gauge();
    let alice = address(1);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK / 2);

    // both views read the last checkpoint
    let before = g.store.clone();
    let balance = g.ledger().point_balance_of(&alice);
    assert!(g.store == before);
    assert_eq!(balance, exp10(21));
    assert_eq!(g.ledger().point_total_supply(), balance);

    g.checkpoint(&alice);
    let balance = g.ledger().point_balance_of(&alice);
    assert_eq!(balance, exp10(21) + big(5_000 * WEEK));
    assert_eq!(g.ledger().point_total_supply(), balance);
}

#[test]
fn test_point_balances_sum_to_total_supply() {
    let mut g = point_gauge();
    let alice = address(1);
    let bob = address(2);
    let carol = address(3);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK / 3);
    g.deposit(&bob, scaled(3, 20));
    g.env.sleep(WEEK);
    g.ledger()
        .transfer(&bob, &carol, &exp10(20))
        .unwrap();
    g.env.sleep(WEEK / 4);
    g.checkpoint(&alice);

    let sum = [&alice, &bob, &carol]
        .iter()
        .fold(big(0), |acc, account| acc + g.ledger().point_balance_of(account));
    assert_eq!(sum, g.ledger().point_total_supply());
}

#[test]
fn test_point_rate_comes_from_schedule() {
    let mut g = point_gauge();
    let alice = address(1);
    g.env
        .point_rates
        .borrow_mut()
        .push((2_001, scaled(20_000, 18)));

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK);
    g.checkpoint(&alice);
    let at_boundary = g.user(&alice).point_fraction;

    g.env.sleep(1_000);
    g.checkpoint(&alice);
    let earned = g.user(&alice).point_fraction - &at_boundary;
    assert_eq!(earned, big(20_000 * 1_000));
    assert_eq!(g.store.gauge.point.rate_cache, scaled(20_000, 18));
}

#[test]
fn test_withdraw_burns_points_pro_rata() {
    let mut g = point_gauge();
    let alice = address(1);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK + WEEK / 2);
    g.checkpoint(&alice);
    let points_before = g.user(&alice).point_fraction;

    g.withdraw(&alice, scaled(5, 20));
    let points_after = g.user(&alice).point_fraction;
    assert_eq!(points_after, &points_before / 2u64);

    let supply = g.ledger().point_total_supply();
    assert_eq!(supply - &g.store.gauge.total_deposited, points_after);
    g.assert_conservation();

    g.withdraw(&alice, scaled(5, 20));
    assert_eq!(g.user(&alice).point_fraction, big(0));
    assert_eq!(g.store.gauge.point.total_points, big(0));
    assert_eq!(g.ledger().point_total_supply(), big(0));
}

#[test]
fn test_transfer_does_not_move_points() {
    let mut g = point_gauge();
    let alice = address(1);
    let bob = address(2);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK);
    g.ledger()
        .transfer(&alice, &bob, &scaled(5, 20))
        .unwrap();

    assert_eq!(g.user(&alice).point_fraction, big(5_000 * WEEK));
    assert_eq!(g.user(&bob).point_fraction, big(0));
    assert_eq!(g.user(&bob).raw_balance, scaled(5, 20));
    g.assert_conservation();
}

#[test]
fn test_equal_stakes_earn_equal_points() {
    let mut g = point_gauge();
    let alice = address(1);
    let bob = address(2);

    g.deposit(&alice, exp10(21));
    g.env.sleep(WEEK);
    g.checkpoint(&alice);
    let alice_before = g.user(&alice).point_fraction;

    g.deposit(&bob, exp10(21));
    g.env.sleep(1_000);
    g.checkpoint(&alice);
    g.checkpoint(&bob);

    let alice_earned = g.user(&alice).point_fraction - &alice_before;
    assert!(alice_earned > 0u64);
    assert_eq!(alice_earned, g.user(&bob).point_fraction);
    g.assert_conservation();
}

#[test]
fn test_set_point_proportion() {
    let mut g = point_gauge();
    let alice = address(1);
    let admin = admin();

    g.deposit(&alice, exp10(21));
    g.env.sleep(10);

    assert_eq!(
        g.ledger().set_point_proportion(&alice, &scaled(2, 17)),
        Err(GaugeError::AdminOnly)
    );
    assert_eq!(
        g.ledger().set_point_proportion(&admin, &(exp10(18) + big(1))),
        Err(GaugeError::ProportionOutOfRange)
    );
    g.ledger().set_point_proportion(&admin, &exp10(18)).unwrap();
    g.ledger().set_point_proportion(&admin, &scaled(2, 17)).unwrap();
    assert_eq!(g.store.gauge.point.proportion, scaled(2, 17));
    assert_eq!(g.store.gauge.point.integral_timestamp, START + 10);

    g.env.sleep(WEEK - 10);
    g.checkpoint(&alice);
    let at_boundary = g.user(&alice).point_fraction;
    assert_eq!(at_boundary, big(10_000 * WEEK));

    g.env.sleep(WEEK / 2);
    g.checkpoint(&alice);
    let earned = g.user(&alice).point_fraction - &at_boundary;
    assert_close(&earned, &exp10(20), 1, 10_000);
}
