//! Black-76 Model
//!
//! Closed-form European option value on a futures contract:
//!
//! ```text
//! d1 = (ln(F/K) + σ²T/2) / (σ√T)
//! d2 = (ln(F/K) - σ²T/2) / (σ√T)
//! call = e^(-rT) (F Φ(d1) - K Φ(d2))
//! put  = e^(-rT) (K Φ(-d2) - F Φ(-d1))
//! ```
//!
//! Rate and volatility are flat across a batch. Zero maturity or zero
//! volatility are not special-cased: the division yields NaN/inf and is
//! passed through to the caller, who is expected to exclude expired
//! contracts before pricing.

use ndarray::{Array1, ArrayView1, Zip};
use statrs::function::erf::erfc;
use std::f64::consts::SQRT_2;

use crate::core::{OptionType, PvError, PvResult};

/// Standard normal CDF
pub fn norm_cdf(x: f64) -> f64 {
    0.5 * erfc(-x / SQRT_2)
}

/// Black-76 d1 parameter
pub fn d1(futures: f64, strike: f64, time: f64, vol: f64) -> f64 {
    ((futures / strike).ln() + 0.5 * vol * vol * time) / (vol * time.sqrt())
}

/// Black-76 d2 parameter
pub fn d2(futures: f64, strike: f64, time: f64, vol: f64) -> f64 {
    ((futures / strike).ln() - 0.5 * vol * vol * time) / (vol * time.sqrt())
}

/// Black-76 present value of a single option
pub fn black76_price(
    futures: f64,
    strike: f64,
    time: f64,
    rate: f64,
    vol: f64,
    option_type: OptionType,
) -> f64 {
    let d1 = d1(futures, strike, time, vol);
    let d2 = d2(futures, strike, time, vol);
    let df = (-rate * time).exp();

    match option_type {
        OptionType::Call => df * (futures * norm_cdf(d1) - strike * norm_cdf(d2)),
        OptionType::Put => df * (strike * norm_cdf(-d2) - futures * norm_cdf(-d1)),
    }
}

/// Black-76 present values, elementwise over equal-length columns.
pub fn black76(
    futures: ArrayView1<f64>,
    strikes: ArrayView1<f64>,
    maturities: ArrayView1<f64>,
    rate: f64,
    vol: f64,
    is_call: ArrayView1<bool>,
) -> PvResult<Array1<f64>> {
    let n = futures.len();
    if strikes.len() != n || maturities.len() != n || is_call.len() != n {
        return Err(PvError::invalid_input(format!(
            "column lengths differ: futures={} strikes={} maturities={} is_call={}",
            n,
            strikes.len(),
            maturities.len(),
            is_call.len()
        )));
    }

    let mut pv = Array1::<f64>::zeros(n);
    Zip::from(&mut pv)
        .and(&futures)
        .and(&strikes)
        .and(&maturities)
        .and(&is_call)
        .for_each(|pv, &f, &k, &t, &call| {
            let option_type = if call { OptionType::Call } else { OptionType::Put };
            *pv = black76_price(f, k, t, rate, vol, option_type);
        });

    Ok(pv)
}
