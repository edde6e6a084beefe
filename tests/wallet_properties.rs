use market_terminal_wasm::domain::market_data::{Price, Symbol};
use market_terminal_wasm::domain::wallet::Wallet;
use quickcheck_macros::quickcheck;

#[quickcheck]
fn balances_never_go_negative(orders: Vec<(bool, u16)>, price: u16) -> bool {
    let price = price.max(1) as f64;
    let mut wallet = Wallet::new("USDT", Symbol::from("BTC"), 50.0, 0.0, Price::new(price));
    for (buy, amount) in orders {
        let amount = amount as f64 / 1000.0;
        let _ = if buy { wallet.buy(amount) } else { wallet.sell(amount) };
        if wallet.quote_balance() < 0.0 || wallet.base_balance() < 0.0 {
            return false;
        }
    }
    true
}

#[quickcheck]
fn full_slider_is_always_affordable(percent: u8, price: u16) -> bool {
    let price = price.max(1) as f64;
    let mut wallet = Wallet::new("USDT", Symbol::from("BTC"), 50.0, 0.0, Price::new(price));
    let percent = (percent % 101) as f64;
    let amount = wallet.amount_for_fraction(percent);
    amount == 0.0 || wallet.buy(amount * (1.0 - 1e-12)).is_ok()
}

#[test]
fn rejected_orders_leave_balances_alone() {
    let mut wallet = Wallet::new("USDT", Symbol::from("BTC"), 50.0, 0.0, Price::new(64_321.0));
    assert!(wallet.buy(1.0).is_err());
    assert!(wallet.sell(0.1).is_err());
    assert!(wallet.buy(0.0).is_err());
    assert!(wallet.buy(f64::NAN).is_err());
    assert_eq!((wallet.quote_balance(), wallet.base_balance()), (50.0, 0.0));
}
