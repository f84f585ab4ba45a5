//! 随机分布采样

use rand::distributions::Standard;
use rand::Rng;

/// 指数分布（泊松过程的间隔）：逆变换 `-ln(1 - U) / rate`，U ∈ [0, 1)。
pub fn exponential<R: Rng + ?Sized>(rng: &mut R, rate: f64) -> f64 {
    let u: f64 = rng.sample(Standard);
    -(1.0 - u).ln() / rate
}
