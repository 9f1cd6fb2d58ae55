use super::*;

#[test]
fn test_to_decimal_precision() {
    // Classic floating point problem: 0.1 + 0.2 != 0.3
    let a = 0.1_f64;
    let b = 0.2_f64;
    let sum_f64 = a + b;

    // f64 fails
    assert_ne!(sum_f64, 0.3);

    // Decimal succeeds
    let sum_dec = to_decimal(a) + to_decimal(b);
    assert_eq!(to_f64(sum_dec), 0.3);
}

#[test]
fn test_accumulation_precision() {
    // Sum 0.01 one thousand times
    let mut total = Decimal::ZERO;
    for _ in 0..1000 {
        total += to_decimal(0.01);
    }
    assert_eq!(to_f64(total), 10.0);
}

#[test]
fn test_line_subtotal() {
    // Scaling scenario from the dashboard: 2x at Rp100.000 minus Rp10.000 off
    assert_eq!(line_subtotal(100_000.0, 2, 10_000.0), 190_000.0);
    assert_eq!(line_subtotal(100_000.0, 1, 0.0), 100_000.0);
    assert_eq!(line_subtotal(0.0, 5, 0.0), 0.0);
}

#[test]
fn test_commission_amount() {
    assert_eq!(commission_amount(190_000.0, 10.0), 19_000.0);
    assert_eq!(commission_amount(100_000.0, 0.0), 0.0);
    // Fractional rates stay exact
    assert_eq!(commission_amount(100_000.0, 2.5), 2_500.0);
}

#[test]
fn test_change_amount() {
    assert_eq!(change_amount(190_000.0, 200_000.0), 10_000.0);
    assert_eq!(change_amount(190_000.0, 190_000.0), 0.0);
    // Underpayment never yields negative change
    assert_eq!(change_amount(190_000.0, 100_000.0), 0.0);
}

#[test]
fn test_payment_status() {
    assert_eq!(payment_status(190_000.0, 200_000.0), PaymentStatus::Paid);
    assert_eq!(payment_status(190_000.0, 190_000.0), PaymentStatus::Paid);
    assert_eq!(payment_status(190_000.0, 100_000.0), PaymentStatus::Partial);
    assert_eq!(payment_status(0.0, 0.0), PaymentStatus::Paid);
}

#[test]
fn test_sum_amounts() {
    assert_eq!(sum_amounts([19_000.0, 2_500.0, 0.0]), 21_500.0);
    assert_eq!(sum_amounts(std::iter::empty()), 0.0);
}

#[test]
fn test_validate_charge() {
    assert!(validate_charge(100_000.0, 2, 10_000.0).is_ok());
    assert!(validate_charge(-1.0, 1, 0.0).is_err());
    assert!(validate_charge(100.0, 0, 0.0).is_err());
    assert!(validate_charge(100.0, 100, 0.0).is_err());
    assert!(validate_charge(100.0, 1, -5.0).is_err());
    assert!(validate_charge(f64::NAN, 1, 0.0).is_err());
    // Discount larger than the line amount is rejected
    assert!(validate_charge(100.0, 1, 150.0).is_err());
}

#[test]
fn test_validate_payment() {
    assert!(validate_payment(190_000.0, 200_000.0).is_ok());
    assert!(validate_payment(190_000.0, 0.0).is_ok());
    assert!(validate_payment(-1.0, 0.0).is_err());
    assert!(validate_payment(0.0, f64::INFINITY).is_err());
}
