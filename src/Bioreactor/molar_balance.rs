//! Per-species integration rules. All amounts in mol, rates in mol/s, time in s.
//!
//! Dissolved gases relax exponentially towards saturation over one step:
//! ```text
//! n' = e^(-k·Δt)·n + (1 - e^(-k·Δt))·(C*·V - r/k)
//! ```
//! which is the exact solution of `dn/dt = k·(C*·V - n) - r` for constant
//! `k`, `C*` and uptake `r`. Everything else is a forward Euler step.

/// Exact relaxation step of a gas-exchanged species.
///
/// `kla` in 1/s, `saturation` is C*·V in mol, `uptake` in mol/s. For
/// `kla·dt == 0` the limit `n - r·Δt` is returned.
pub fn relaxation_update(moles: f64, kla: f64, dt: f64, saturation: f64, uptake: f64) -> f64 {
    let x = kla * dt;
    if x > 0.0 {
        let retained = (-x).exp();
        // (1 - e^-x)/k without cancellation for small x
        let exchanged = -(-x).exp_m1();
        retained * moles + exchanged * saturation - uptake * exchanged / kla
    } else {
        moles - uptake * dt
    }
}

/// Forward Euler step of a species that only sees feed and cells.
pub fn explicit_update(moles: f64, feed: f64, transfer: f64, dt: f64) -> f64 {
    moles + (feed + transfer) * dt
}
