/// Format an amount as whole yen with thousands separators: ¥1,234
///
/// Fractions are floored; this is for display only.
pub fn yen(val: f64) -> String {
    let negative = val < 0.0;
    let whole = val.abs().floor() as u64;
    let digits = whole.to_string();

    let mut with_commas = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            with_commas.push(',');
        }
        with_commas.push(c);
    }
    let with_commas: String = with_commas.chars().rev().collect();

    if negative {
        format!("-¥{with_commas}")
    } else {
        format!("¥{with_commas}")
    }
}
