//! Randomized invariant tests over bounded-depth expressions and propositions.

use infnat::ast::{Assignment, Expr, ExtNat, Name, Op, Prop};
use infnat::{defined, no_inf, simp_step, simp_steps, simplify, IfExpr};
use rand::{rngs::StdRng, Rng, SeedableRng};

const VAR_COUNT: u32 = 4;

const ALL_OPS: [Op; 12] = [
    Op::Add,
    Op::Sub,
    Op::Mul,
    Op::Exp,
    Op::Div,
    Op::Mod,
    Op::Lg2,
    Op::Width,
    Op::Min,
    Op::Max,
    Op::LenFromThen,
    Op::LenFromThenTo,
];

fn random_expr(rng: &mut StdRng, depth: u32, ops: &[Op]) -> Expr {
    if depth == 0 || rng.gen_ratio(1, 3) {
        match rng.gen_range(0..6) {
            0 => Expr::inf(),
            1..=3 => Expr::nat(rng.gen_range(0u32..4)),
            _ => Expr::var(rng.gen_range(0..VAR_COUNT)),
        }
    } else {
        let op = ops[rng.gen_range(0..ops.len())];
        let args = (0..op.arity())
            .map(|_| random_expr(rng, depth - 1, ops))
            .collect();
        Expr::Op(op, args)
    }
}

fn random_prop(rng: &mut StdRng, depth: u32) -> Prop {
    if depth == 0 {
        match rng.gen_range(0..6) {
            0 => Prop::True,
            1 => Prop::False,
            2 => Prop::fin(random_expr(rng, 2, &ALL_OPS)),
            3 => Prop::eq(random_expr(rng, 2, &ALL_OPS), random_expr(rng, 2, &ALL_OPS)),
            4 => Prop::geq(random_expr(rng, 2, &ALL_OPS), random_expr(rng, 2, &ALL_OPS)),
            _ => Prop::gt(random_expr(rng, 2, &ALL_OPS), random_expr(rng, 2, &ALL_OPS)),
        }
    } else {
        match rng.gen_range(0..4) {
            0 => !random_prop(rng, depth - 1),
            1 => random_prop(rng, depth - 1).and(random_prop(rng, depth - 1)),
            2 => random_prop(rng, depth - 1).or(random_prop(rng, depth - 1)),
            _ => random_prop(rng, 0),
        }
    }
}

fn random_assignment(rng: &mut StdRng) -> Assignment {
    let pool = [
        ExtNat::from(0u32),
        ExtNat::from(1u32),
        ExtNat::from(2u32),
        ExtNat::from(3u32),
        ExtNat::from(7u32),
        ExtNat::Inf,
    ];
    (0..VAR_COUNT)
        .map(|i| (Name::new(i), pool[rng.gen_range(0..pool.len())].clone()))
        .collect()
}

#[test]
fn simplification_reaches_a_fixpoint() {
    let mut rng = StdRng::seed_from_u64(0xca55e77e);
    for _ in 0..200 {
        let prop = random_prop(&mut rng, 2);
        let normal = simplify(prop.clone());
        assert!(
            simp_step(&normal).is_none(),
            "still steps after simplify: {}",
            normal
        );
        assert_eq!(simplify(normal.clone()), normal, "not idempotent: {}", prop);
    }
}

#[test]
fn every_step_preserves_evaluation() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..100 {
        let prop = random_prop(&mut rng, 2);
        let envs: Vec<_> = (0..6).map(|_| random_assignment(&mut rng)).collect();
        let steps: Vec<_> = simp_steps(prop).take(20_000).collect();
        assert!(steps.len() < 20_000, "runaway step sequence");
        for pair in steps.windows(2) {
            for env in &envs {
                if let (Some(before), Some(after)) =
                    (pair[0].evaluate(env), pair[1].evaluate(env))
                {
                    assert_eq!(
                        before, after,
                        "step changed meaning:\n  before: {}\n  after:  {}",
                        pair[0], pair[1]
                    );
                }
            }
        }
    }
}

#[test]
fn definedness_is_conservative() {
    // `lenFromThen` is left out: its definedness also depends on the first element fitting in
    // the width, which the predicate deliberately does not encode
    let ops: Vec<Op> = ALL_OPS
        .iter()
        .copied()
        .filter(|op| *op != Op::LenFromThen)
        .collect();
    let mut rng = StdRng::seed_from_u64(0xdef1ed);
    for _ in 0..300 {
        let expr = random_expr(&mut rng, 2, &ops);
        let guard = defined(&expr);
        for _ in 0..6 {
            let env = random_assignment(&mut rng);
            if guard.evaluate(&env) == Some(true) {
                assert!(
                    expr.evaluate(&env).is_some(),
                    "defined({}) holds but evaluation is undefined",
                    expr
                );
            }
        }
    }
}

fn check_leaves(tree: &IfExpr<Expr>, original: &Expr) {
    match tree {
        IfExpr::Impossible => (),
        IfExpr::Return(leaf) => assert!(
            leaf.is_inf() || !leaf.contains_inf(),
            "leaf `{}` of `{}` mentions infinity",
            leaf,
            original
        ),
        IfExpr::If(cond, then, els) => {
            assert!(
                matches!(cond, Prop::EqFin(..)),
                "branch predicate `{}` of `{}` is not a strict equality",
                cond,
                original
            );
            check_leaves(then, original);
            check_leaves(els, original);
        }
    }
}

#[test]
fn infinity_elimination_leaves_are_pure() {
    let mut rng = StdRng::seed_from_u64(0x1f);
    for _ in 0..300 {
        let expr = random_expr(&mut rng, 3, &ALL_OPS);
        check_leaves(&no_inf(&expr), &expr);
    }
}

fn strict_atoms_mention_inf(prop: &Prop) -> bool {
    match prop {
        Prop::True | Prop::False | Prop::Fin(_) => false,
        Prop::EqFin(x, y) | Prop::GtFin(x, y) => x.contains_inf() || y.contains_inf(),
        Prop::Eq(..) | Prop::Geq(..) | Prop::Gt(..) => false,
        Prop::Not(p) => strict_atoms_mention_inf(p),
        Prop::And(p, q) | Prop::Or(p, q) => {
            strict_atoms_mention_inf(p) || strict_atoms_mention_inf(q)
        }
    }
}

#[test]
fn strict_atoms_are_infinity_free() {
    let mut rng = StdRng::seed_from_u64(0x57a7);
    for _ in 0..200 {
        let prop = random_prop(&mut rng, 2);
        let normal = simplify(prop);
        assert!(
            !strict_atoms_mention_inf(&normal),
            "a strict atom mentions infinity: {}",
            normal
        );
    }
}

fn contains_fin_atom(prop: &Prop, name: Name) -> bool {
    match prop {
        Prop::Fin(Expr::Var(x)) => *x == name,
        Prop::Not(p) => contains_fin_atom(p, name),
        Prop::And(p, q) | Prop::Or(p, q) => {
            contains_fin_atom(p, name) || contains_fin_atom(q, name)
        }
        _ => false,
    }
}

#[test]
fn variable_finiteness_propagates() {
    let mut rng = StdRng::seed_from_u64(0xf1);
    let var = Name::new(0);
    for negated in [false, true] {
        for _ in 0..150 {
            let atom = if negated {
                !Prop::fin(Expr::Var(var))
            } else {
                Prop::fin(Expr::Var(var))
            };
            let prop = atom.clone().and(random_prop(&mut rng, 2));
            let normal = simplify(prop);
            if let Prop::And(head, rest) = &normal {
                if **head == atom {
                    assert!(
                        !contains_fin_atom(rest, var),
                        "`{}` still occurs outside the leading conjunct: {}",
                        atom,
                        normal
                    );
                }
            }
        }
    }
}
