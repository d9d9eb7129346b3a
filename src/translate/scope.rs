//! Name → value bindings handed to the evaluator along with an expression

use std::collections::BTreeMap;
use std::f64::consts::{E, PI};
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Unit of angles for the trig functions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleMode {
    Degree,
    #[default]
    Radian,
}

/// Callable bound in a scope; `None` means "undefined for these arguments"
pub type ScopeFn = Arc<dyn Fn(&[f64]) -> Option<f64> + Send + Sync>;

#[derive(Clone)]
pub enum ScopeValue {
    Constant(f64),
    Function(ScopeFn),
}

impl fmt::Debug for ScopeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeValue::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            ScopeValue::Function(_) => f.write_str("Function(..)"),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Scope {
    values: BTreeMap<String, ScopeValue>,
}

impl Scope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constants and functions every translated expression may refer to
    pub fn standard(mode: AngleMode) -> Self {
        let mut scope = Self::new();
        let degrees = mode == AngleMode::Degree;

        // Trig functions take their argument in the configured unit
        let to_rad = move |x: f64| if degrees { x.to_radians() } else { x };
        let from_rad = move |x: f64| if degrees { x.to_degrees() } else { x };

        scope.insert_unary("sin", move |x| to_rad(x).sin());
        scope.insert_unary("cos", move |x| to_rad(x).cos());
        scope.insert_unary("tan", move |x| to_rad(x).tan());
        scope.insert_unary("cot", move |x| 1.0 / to_rad(x).tan());
        scope.insert_unary("sec", move |x| 1.0 / to_rad(x).cos());
        scope.insert_unary("csc", move |x| 1.0 / to_rad(x).sin());

        scope.insert_unary("asin", move |x| from_rad(x.asin()));
        scope.insert_unary("acos", move |x| from_rad(x.acos()));
        scope.insert_unary("atan", move |x| from_rad(x.atan()));

        scope.insert_unary("sinh", f64::sinh);
        scope.insert_unary("cosh", f64::cosh);
        scope.insert_unary("tanh", f64::tanh);
        scope.insert_unary("asinh", f64::asinh);
        scope.insert_unary("acosh", f64::acosh);
        scope.insert_unary("atanh", f64::atanh);

        scope.insert_function("log", |args| match *args {
            [x] => defined(x.ln()),
            [x, base] => defined(x.ln() / base.ln()),
            _ => None,
        });
        scope.insert_unary("log10", f64::log10);
        scope.insert_unary("sqrt", f64::sqrt);
        scope.insert_function("nthRoot", |args| match *args {
            [x] => defined(x.sqrt()),
            [x, n] => nth_root(x, n),
            _ => None,
        });

        scope.insert_constant("pi", PI);
        scope.insert_constant("e", E);
        scope
    }

    pub fn insert_constant(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), ScopeValue::Constant(value));
    }

    pub fn insert_function(
        &mut self,
        name: impl Into<String>,
        function: impl Fn(&[f64]) -> Option<f64> + Send + Sync + 'static,
    ) {
        self.values
            .insert(name.into(), ScopeValue::Function(Arc::new(function)));
    }

    fn insert_unary(&mut self, name: &str, function: impl Fn(f64) -> f64 + Send + Sync + 'static) {
        self.insert_function(name, move |args| match *args {
            [x] => defined(function(x)),
            _ => None,
        });
    }

    pub fn get(&self, name: &str) -> Option<&ScopeValue> {
        self.values.get(name)
    }

    pub fn constant(&self, name: &str) -> Option<f64> {
        match self.values.get(name)? {
            ScopeValue::Constant(value) => Some(*value),
            ScopeValue::Function(_) => None,
        }
    }

    /// Call a bound function
    pub fn call(&self, name: &str, args: &[f64]) -> Option<f64> {
        match self.values.get(name)? {
            ScopeValue::Function(function) => function(args),
            ScopeValue::Constant(_) => None,
        }
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

fn defined(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

/// Real `n`-th root; odd roots of negatives stay real
fn nth_root(x: f64, n: f64) -> Option<f64> {
    if n == 0.0 {
        return None;
    }
    if x >= 0.0 {
        return defined(x.powf(1.0 / n));
    }
    let is_odd_integer = n.fract() == 0.0 && (n as i64) % 2 != 0;
    if is_odd_integer {
        defined(-(-x).powf(1.0 / n))
    } else {
        None
    }
}
