use rust_decimal::Decimal;

/// Format an amount as Indian rupees with en-IN digit grouping:
/// the last three digits form one group, everything above groups in twos.
pub fn format_inr(amount: Decimal) -> String {
    let text = amount.normalize().to_string();
    match text.split_once('.') {
        Some((int_part, frac_part)) => format!("₹{}.{}", group_indian(int_part), frac_part),
        None => format!("₹{}", group_indian(&text)),
    }
}

fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_inr_grouping() {
        assert_eq!(format_inr(Decimal::from(0)), "₹0");
        assert_eq!(format_inr(Decimal::from(100)), "₹100");
        assert_eq!(format_inr(Decimal::from(2999)), "₹2,999");
        assert_eq!(format_inr(Decimal::from(100_000)), "₹1,00,000");
        assert_eq!(format_inr(Decimal::from(1_234_567)), "₹12,34,567");
        assert_eq!(format_inr(Decimal::from(123_456_789)), "₹12,34,56,789");
    }

    #[test]
    fn test_format_inr_fractions() {
        // Trailing zeros are dropped, matching toLocaleString behavior
        assert_eq!(format_inr(Decimal::new(29995, 1)), "₹2,999.5");
        assert_eq!(format_inr(Decimal::new(100_00, 2)), "₹100");
    }
}
