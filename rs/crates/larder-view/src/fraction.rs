//! Quantities as cooks write them: `1 1/2`, `3/4`.

const TOLERANCE: f64 = 0.001;
const FINEST: u64 = 16;

fn gcd(a: u64, b: u64) -> u64 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}

/// Format a quantity as a mixed fraction. `None` formats as an empty string.
///
/// Fractions with a denominator up to 16 are shown exactly; anything else
/// is rounded to the nearest sixteenth.
pub fn format_quantity(quantity: Option<f64>) -> String {
    let Some(q) = quantity.filter(|q| q.is_finite() && *q > 0.0) else {
        return String::new();
    };

    let mut whole = q.trunc() as u64;
    let frac = q.fract();
    let (mut num, mut den) = (0u64, 1u64);

    if frac > TOLERANCE {
        let exact = (1..=FINEST).find_map(|d| {
            let n = (frac * d as f64).round();
            ((frac - n / d as f64).abs() < TOLERANCE).then_some((n as u64, d))
        });
        (num, den) = exact.unwrap_or(((frac * FINEST as f64).round() as u64, FINEST));
        if num == den {
            whole += 1;
            num = 0;
        }
    }

    if whole == 0 && num == 0 {
        // below a sixteenth
        return format!("{}", (q * 1000.0).round() / 1000.0);
    }
    if num == 0 {
        return whole.to_string();
    }
    let g = gcd(num, den);
    let (num, den) = (num / g, den / g);
    if whole == 0 {
        format!("{}/{}", num, den)
    } else {
        format!("{} {}/{}", whole, num, den)
    }
}
