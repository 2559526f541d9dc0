/// A scalar equation `f(x) = 0`.
///
/// Closures of the form `Fn(f64) -> f64` implement this trait automatically,
/// so ad hoc residuals can be passed straight to a solver.
pub trait Equation {
    /// Evaluates the residual at `x`.
    fn residual(&self, x: f64) -> f64;
}

impl<F> Equation for F
where
    F: Fn(f64) -> f64,
{
    fn residual(&self, x: f64) -> f64 {
        self(x)
    }
}
