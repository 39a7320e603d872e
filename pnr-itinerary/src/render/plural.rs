//! Russian plural selection.
//!
//! Russian nouns take one of three forms after a numeral, chosen by the last
//! two decimal digits: 11-14 always take the "many" form, otherwise a final
//! 1 takes "one", a final 2-4 takes "few", and everything else takes "many".

/// The three Russian plural forms.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluralCategory {
    /// 1, 21, 31, ... (час, минута)
    One,
    /// 2-4, 22-24, ... (часа, минуты)
    Few,
    /// 0, 5-20, 25-30, ... (часов, минут)
    Many,
}

/// Select the plural category for a cardinal number.
pub fn plural_category(n: u64) -> PluralCategory {
    if (11..=14).contains(&(n % 100)) {
        return PluralCategory::Many;
    }
    match n % 10 {
        1 => PluralCategory::One,
        2..=4 => PluralCategory::Few,
        _ => PluralCategory::Many,
    }
}

/// Pick the noun form agreeing with `n`.
pub fn plural_ru<'a>(n: u64, one: &'a str, few: &'a str, many: &'a str) -> &'a str {
    match plural_category(n) {
        PluralCategory::One => one,
        PluralCategory::Few => few,
        PluralCategory::Many => many,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The category depends only on the last two digits
        #[test]
        fn category_is_periodic_mod_100(n in 0u64..10_000) {
            prop_assert_eq!(plural_category(n), plural_category(n % 100));
        }
    }
}
