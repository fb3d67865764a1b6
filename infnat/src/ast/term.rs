use indexmap::IndexSet;
use rug::{ops::Pow, Integer};

/// A natural number extended with a single infinity element.
///
/// The derived ordering relies on `Nat` being declared before `Inf`, so that `Inf` is strictly
/// greater than every finite value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ExtNat {
    /// A finite natural number.
    Nat(Integer),

    /// The infinity element.
    Inf,
}

impl ExtNat {
    /// Returns `true` if the value is infinite.
    pub fn is_inf(&self) -> bool {
        matches!(self, ExtNat::Inf)
    }

    /// Tries to extract a finite value. Returns `Some` if the value is not infinity.
    pub fn as_nat(&self) -> Option<&Integer> {
        match self {
            ExtNat::Nat(n) => Some(n),
            ExtNat::Inf => None,
        }
    }

    /// Addition. Total; anything plus infinity is infinity.
    pub fn add(&self, other: &ExtNat) -> ExtNat {
        match (self, other) {
            (ExtNat::Nat(a), ExtNat::Nat(b)) => ExtNat::Nat(Integer::from(a + b)),
            _ => ExtNat::Inf,
        }
    }

    /// Subtraction. Undefined on underflow and whenever the subtrahend is infinite.
    pub fn sub(&self, other: &ExtNat) -> Option<ExtNat> {
        match (self, other) {
            (_, ExtNat::Inf) => None,
            (ExtNat::Inf, ExtNat::Nat(_)) => Some(ExtNat::Inf),
            (ExtNat::Nat(a), ExtNat::Nat(b)) => {
                if a < b {
                    None
                } else {
                    Some(ExtNat::Nat(Integer::from(a - b)))
                }
            }
        }
    }

    /// Multiplication. Total; zero absorbs infinity.
    pub fn mul(&self, other: &ExtNat) -> ExtNat {
        match (self, other) {
            (ExtNat::Nat(a), ExtNat::Nat(b)) => ExtNat::Nat(Integer::from(a * b)),
            (ExtNat::Nat(n), ExtNat::Inf) | (ExtNat::Inf, ExtNat::Nat(n)) => {
                if *n == 0 {
                    ExtNat::Nat(Integer::new())
                } else {
                    ExtNat::Inf
                }
            }
            (ExtNat::Inf, ExtNat::Inf) => ExtNat::Inf,
        }
    }

    /// Exponentiation. A zero exponent always yields one, including for an infinite base. A
    /// finite exponent that does not fit in 32 bits is treated as undefined, unless the base is
    /// zero or one.
    pub fn exp(&self, other: &ExtNat) -> Option<ExtNat> {
        match (self, other) {
            (_, ExtNat::Nat(e)) if *e == 0 => Some(ExtNat::Nat(Integer::from(1))),
            (ExtNat::Inf, _) => Some(ExtNat::Inf),
            (ExtNat::Nat(b), ExtNat::Inf) => {
                if *b == 0 || *b == 1 {
                    Some(ExtNat::Nat(b.clone()))
                } else {
                    Some(ExtNat::Inf)
                }
            }
            (ExtNat::Nat(b), ExtNat::Nat(e)) => {
                if *b == 0 || *b == 1 {
                    Some(ExtNat::Nat(b.clone()))
                } else {
                    let e = e.to_u32()?;
                    Some(ExtNat::Nat(Integer::from(b.pow(e))))
                }
            }
        }
    }

    /// Floor division. Undefined when the dividend is infinite or the divisor is zero. A finite
    /// value divided by infinity is zero.
    pub fn div(&self, other: &ExtNat) -> Option<ExtNat> {
        match (self, other) {
            (ExtNat::Inf, _) => None,
            (ExtNat::Nat(_), ExtNat::Inf) => Some(ExtNat::Nat(Integer::new())),
            (ExtNat::Nat(a), ExtNat::Nat(b)) => {
                if *b == 0 {
                    None
                } else {
                    Some(ExtNat::Nat(Integer::from(a / b)))
                }
            }
        }
    }

    /// Remainder of floor division. Undefined in the same cases as [`ExtNat::div`]. A finite
    /// value modulo infinity is the value itself.
    pub fn modulo(&self, other: &ExtNat) -> Option<ExtNat> {
        match (self, other) {
            (ExtNat::Inf, _) => None,
            (ExtNat::Nat(a), ExtNat::Inf) => Some(ExtNat::Nat(a.clone())),
            (ExtNat::Nat(a), ExtNat::Nat(b)) => {
                if *b == 0 {
                    None
                } else {
                    Some(ExtNat::Nat(Integer::from(a % b)))
                }
            }
        }
    }

    /// Ceiling of the base-two logarithm, with `lg2 0 = 0`.
    pub fn lg2(&self) -> ExtNat {
        match self {
            ExtNat::Inf => ExtNat::Inf,
            ExtNat::Nat(n) => {
                if *n == 0 {
                    ExtNat::Nat(Integer::new())
                } else {
                    let predecessor = Integer::from(n - 1u32);
                    ExtNat::Nat(Integer::from(predecessor.significant_bits()))
                }
            }
        }
    }

    /// The number of bits needed to represent a value, with `width 0 = 0`.
    pub fn width(&self) -> ExtNat {
        match self {
            ExtNat::Inf => ExtNat::Inf,
            ExtNat::Nat(n) => ExtNat::Nat(Integer::from(n.significant_bits())),
        }
    }

    /// The length of the enumeration `[x, y ..]` of values of bit width `w`. Undefined unless
    /// all three arguments are finite, `x != y`, and `x` fits in the width. Descending
    /// enumerations and zero-width elements give an empty enumeration.
    pub fn len_from_then(x: &ExtNat, y: &ExtNat, w: &ExtNat) -> Option<ExtNat> {
        let (x, y, w) = (x.as_nat()?, y.as_nat()?, w.as_nat()?);
        if x == y {
            return None;
        }
        if *w == 0 || x > y {
            return Some(ExtNat::Nat(Integer::new()));
        }
        let last = Integer::from(2).pow(w.to_u32()?) - 1u32;
        if x > &last {
            return None;
        }
        Some(ExtNat::Nat(
            Integer::from(&last - x) / Integer::from(y - x) + 1u32,
        ))
    }

    /// The length of the enumeration `[x, y .. z]`. Undefined unless all three arguments are
    /// finite and `x != y`.
    pub fn len_from_then_to(x: &ExtNat, y: &ExtNat, z: &ExtNat) -> Option<ExtNat> {
        let (x, y, z) = (x.as_nat()?, y.as_nat()?, z.as_nat()?);
        match x.cmp(y) {
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Less => Some(ExtNat::Nat(if z < x {
                Integer::new()
            } else {
                Integer::from(z - x) / Integer::from(y - x) + 1u32
            })),
            std::cmp::Ordering::Greater => Some(ExtNat::Nat(if z > x {
                Integer::new()
            } else {
                Integer::from(x - z) / Integer::from(x - y) + 1u32
            })),
        }
    }
}

impl From<u32> for ExtNat {
    fn from(n: u32) -> Self {
        ExtNat::Nat(Integer::from(n))
    }
}

impl From<Integer> for ExtNat {
    fn from(n: Integer) -> Self {
        ExtNat::Nat(n)
    }
}

/// A variable name. Names are opaque identifiers and are only ever compared for equality; the
/// display form is derived from the index (see the printer module).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Name(u32);

impl Name {
    pub fn new(index: u32) -> Self {
        Name(index)
    }

    pub fn index(self) -> u32 {
        self.0
    }
}

/// The operator of an operation expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    /// The `+` operator.
    Add,

    /// The `-` operator. Partial: undefined on underflow and infinite subtrahends.
    Sub,

    /// The `*` operator.
    Mul,

    /// The `^^` (exponentiation) operator.
    Exp,

    /// The `div` operator. Partial: undefined for infinite dividends and zero divisors.
    Div,

    /// The `mod` operator. Partial in the same cases as `div`.
    Mod,

    /// The `lg2` (ceiling base-two logarithm) operator.
    Lg2,

    /// The `width` (bit width) operator.
    Width,

    /// The `min` operator.
    Min,

    /// The `max` operator.
    Max,

    /// The `lenFromThen` operator: the length of `[x, y ..]` at a given bit width.
    LenFromThen,

    /// The `lenFromThenTo` operator: the length of `[x, y .. z]`.
    LenFromThenTo,
}

impl_str_conversion_traits!(Op {
    Add: "+",
    Sub: "-",
    Mul: "*",
    Exp: "^^",
    Div: "div",
    Mod: "mod",
    Lg2: "lg2",
    Width: "width",
    Min: "min",
    Max: "max",
    LenFromThen: "lenFromThen",
    LenFromThenTo: "lenFromThenTo",
});

impl Op {
    /// The number of arguments the operator takes.
    pub fn arity(self) -> usize {
        match self {
            Op::Lg2 | Op::Width => 1,
            Op::Add | Op::Sub | Op::Mul | Op::Exp | Op::Div | Op::Mod | Op::Min | Op::Max => 2,
            Op::LenFromThen | Op::LenFromThenTo => 3,
        }
    }

    /// Returns `true` if the operator is printed as a function application rather than infix.
    pub fn is_prefix(self) -> bool {
        !matches!(self, Op::Add | Op::Sub | Op::Mul | Op::Exp)
    }
}

/// A symbolic arithmetic expression over the extended naturals.
///
/// Expressions are owned, immutable trees; equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expr {
    /// A constant.
    K(ExtNat),

    /// A variable.
    Var(Name),

    /// An application of a built-in operator. The number of arguments always matches the
    /// operator's arity.
    Op(Op, Vec<Expr>),
}

impl Expr {
    /// The constant zero.
    pub fn zero() -> Self {
        Expr::K(ExtNat::Nat(Integer::new()))
    }

    /// The constant one.
    pub fn one() -> Self {
        Expr::K(ExtNat::Nat(Integer::from(1)))
    }

    /// The constant infinity.
    pub fn inf() -> Self {
        Expr::K(ExtNat::Inf)
    }

    /// Constructs a finite constant expression.
    pub fn nat(value: impl Into<Integer>) -> Self {
        Expr::K(ExtNat::Nat(value.into()))
    }

    /// Constructs a variable expression from a name index.
    pub fn var(index: u32) -> Self {
        Expr::Var(Name::new(index))
    }

    /// Returns `true` if the expression is the literal constant zero.
    pub fn is_zero(&self) -> bool {
        matches!(self, Expr::K(ExtNat::Nat(n)) if *n == 0)
    }

    /// Returns `true` if the expression is the literal constant infinity.
    pub fn is_inf(&self) -> bool {
        matches!(self, Expr::K(ExtNat::Inf))
    }

    /// Tries to extract a constant. Returns `Some` if the expression is a literal.
    pub fn as_const(&self) -> Option<&ExtNat> {
        match self {
            Expr::K(k) => Some(k),
            _ => None,
        }
    }

    /// Returns `true` if the literal constant infinity occurs anywhere in the expression.
    pub fn contains_inf(&self) -> bool {
        match self {
            Expr::K(k) => k.is_inf(),
            Expr::Var(_) => false,
            Expr::Op(_, args) => args.iter().any(Expr::contains_inf),
        }
    }

    /// Collects the free variables of the expression into `vars`, in first-occurrence order.
    pub fn free_vars(&self, vars: &mut IndexSet<Name>) {
        match self {
            Expr::K(_) => (),
            Expr::Var(name) => {
                vars.insert(*name);
            }
            Expr::Op(_, args) => {
                for a in args {
                    a.free_vars(vars);
                }
            }
        }
    }

    /// The number of nodes in the expression tree.
    pub fn size(&self) -> usize {
        match self {
            Expr::K(_) | Expr::Var(_) => 1,
            Expr::Op(_, args) => 1 + args.iter().map(Expr::size).sum::<usize>(),
        }
    }
}

/// A proposition over symbolic expressions.
///
/// The `EqFin` and `GtFin` atoms are the strict comparisons over the plain naturals: the
/// simplifier only ever produces them with arguments it has proven finite by case analysis, and
/// they are the fixed points handed to an external finite decision procedure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Prop {
    /// The always-true proposition.
    True,

    /// The always-false proposition.
    False,

    /// The predicate "the expression denotes a finite value".
    Fin(Expr),

    /// Equality over the extended naturals.
    Eq(Expr, Expr),

    /// Ordering (`>=`) over the extended naturals.
    Geq(Expr, Expr),

    /// Strict ordering (`>`) over the extended naturals.
    Gt(Expr, Expr),

    /// Strict equality over the plain naturals; both sides are known finite.
    EqFin(Expr, Expr),

    /// Strict ordering over the plain naturals; both sides are known finite.
    GtFin(Expr, Expr),

    /// Negation.
    Not(Box<Prop>),

    /// Conjunction.
    And(Box<Prop>, Box<Prop>),

    /// Disjunction.
    Or(Box<Prop>, Box<Prop>),
}

impl Prop {
    /// Constructs the constant proposition for a boolean.
    pub fn bool(value: bool) -> Self {
        if value {
            Prop::True
        } else {
            Prop::False
        }
    }

    pub fn fin(e: Expr) -> Self {
        Prop::Fin(e)
    }

    pub fn eq(x: Expr, y: Expr) -> Self {
        Prop::Eq(x, y)
    }

    pub fn geq(x: Expr, y: Expr) -> Self {
        Prop::Geq(x, y)
    }

    pub fn gt(x: Expr, y: Expr) -> Self {
        Prop::Gt(x, y)
    }

    pub fn eq_fin(x: Expr, y: Expr) -> Self {
        Prop::EqFin(x, y)
    }

    pub fn gt_fin(x: Expr, y: Expr) -> Self {
        Prop::GtFin(x, y)
    }

    /// Conjunction of `self` and `other`.
    pub fn and(self, other: Prop) -> Self {
        Prop::And(Box::new(self), Box::new(other))
    }

    /// Disjunction of `self` and `other`.
    pub fn or(self, other: Prop) -> Self {
        Prop::Or(Box::new(self), Box::new(other))
    }

    /// Returns `true` if the proposition is the given boolean constant.
    pub fn is_bool_constant(&self, value: bool) -> bool {
        match value {
            true => matches!(self, Prop::True),
            false => matches!(self, Prop::False),
        }
    }

    /// Collects the free variables of the proposition into `vars`, in first-occurrence order.
    pub fn free_vars(&self, vars: &mut IndexSet<Name>) {
        match self {
            Prop::True | Prop::False => (),
            Prop::Fin(e) => e.free_vars(vars),
            Prop::Eq(x, y)
            | Prop::Geq(x, y)
            | Prop::Gt(x, y)
            | Prop::EqFin(x, y)
            | Prop::GtFin(x, y) => {
                x.free_vars(vars);
                y.free_vars(vars);
            }
            Prop::Not(p) => p.free_vars(vars),
            Prop::And(p, q) | Prop::Or(p, q) => {
                p.free_vars(vars);
                q.free_vars(vars);
            }
        }
    }

    /// The number of nodes in the proposition tree, counting expression nodes.
    pub fn size(&self) -> usize {
        match self {
            Prop::True | Prop::False => 1,
            Prop::Fin(e) => 1 + e.size(),
            Prop::Eq(x, y)
            | Prop::Geq(x, y)
            | Prop::Gt(x, y)
            | Prop::EqFin(x, y)
            | Prop::GtFin(x, y) => 1 + x.size() + y.size(),
            Prop::Not(p) => 1 + p.size(),
            Prop::And(p, q) | Prop::Or(p, q) => 1 + p.size() + q.size(),
        }
    }
}

impl std::ops::Not for Prop {
    type Output = Prop;

    fn not(self) -> Prop {
        Prop::Not(Box::new(self))
    }
}
