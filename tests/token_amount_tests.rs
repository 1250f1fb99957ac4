#[cfg(test)]
mod tests {
    use icon_sdk::core::token_amount::{TokenAmount, TokenAmountError};
    use num_bigint::BigUint;

    #[test]
    fn test_native_icx() {
        let amount = TokenAmount::native_icx(1_000_000_000_000_000_000u64);
        assert_eq!(amount.raw, BigUint::from(1_000_000_000_000_000_000u64));
        assert_eq!(amount.decimals, 18);
        assert_eq!(amount.symbol(), Some("ICX"));
        assert_eq!(amount.to_hex(), "0xde0b6b3a7640000");
    }

    #[test]
    fn test_from_human_native_icx() {
        let amount = TokenAmount::from_human_native_icx("0.1").unwrap();
        assert_eq!(amount.to_hex(), "0x16345785d8a0000");
        assert_eq!(amount.human(), "0.1");
    }

    #[test]
    fn test_from_human_custom_token() {
        let amount = TokenAmount::from_human("12.5", 6, Some("USDC".to_string())).unwrap();
        assert_eq!(amount.raw, BigUint::from(12_500_000u64));
        assert_eq!(amount.to_string(), "12.5 USDC");
    }

    #[test]
    fn test_from_human_invalid() {
        let result = TokenAmount::from_human_native_icx("one");
        assert!(matches!(result, Err(TokenAmountError::Numeric(_))));
    }

    #[test]
    fn test_display_without_symbol() {
        let amount = TokenAmount::new(BigUint::from(1500u32), 3, None);
        assert_eq!(amount.to_string(), "1.5");
    }

    #[test]
    fn test_try_add() {
        let a = TokenAmount::from_human_native_icx("1.25").unwrap();
        let b = TokenAmount::from_human_native_icx("0.75").unwrap();
        let sum = a.try_add(&b).unwrap();
        assert_eq!(sum.human(), "2");
        assert_eq!(sum.symbol(), Some("ICX"));
    }

    #[test]
    fn test_try_add_takes_symbol_from_either_side() {
        let a = TokenAmount::new(BigUint::from(1u8), 18, None);
        let b = TokenAmount::native_icx(2u8);
        assert_eq!(a.try_add(&b).unwrap().symbol(), Some("ICX"));
    }

    #[test]
    fn test_try_add_decimal_mismatch() {
        let a = TokenAmount::new(BigUint::from(1u8), 18, None);
        let b = TokenAmount::new(BigUint::from(1u8), 6, None);
        assert!(matches!(a.try_add(&b), Err(TokenAmountError::DecimalMismatch(18, 6))));
    }

    #[test]
    fn test_try_add_symbol_mismatch() {
        let a = TokenAmount::new(BigUint::from(1u8), 18, Some("ICX".to_string()));
        let b = TokenAmount::new(BigUint::from(1u8), 18, Some("sICX".to_string()));
        assert!(matches!(a.try_add(&b), Err(TokenAmountError::SymbolMismatch(_, _))));
    }
}
