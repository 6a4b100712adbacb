use rand::prelude::*;

use ultracalc_core::evaluator::parse;
use ultracalc_core::node::*;
use ultracalc_core::Value;

struct RecursiveCtx {
    pub depth: u32,
    pub inside_trigo: bool,
    pub inside_exp: u32,
}

fn random_const(ctx: &RecursiveCtx) -> ConstKind {
    if ctx.inside_exp > 0 {
        // tau is still too big!
        // (tau**tau is approximately 103540.920434)
        return if thread_rng().gen() {
            ConstKind::Pi
        } else {
            ConstKind::E
        };
    }
    const CONSTS: [ConstKind; 3] = [ConstKind::Pi, ConstKind::Tau, ConstKind::E];
    CONSTS[thread_rng().gen_range(0..CONSTS.len())]
}

fn random_num(ctx: &RecursiveCtx) -> Node {
    let mut rng = thread_rng();
    match rng.gen_range(0..10) {
        0 => Node::int(0),
        1 => Node::int(1),
        2 => Node::float(rng.gen_range(0.0..100.0)),
        x => {
            // If we're in a trigonometry function, we don't want enormous
            // numbers.
            if !ctx.inside_trigo && x == 9 {
                return Node::int(rng.gen::<i32>().into());
            }
            // If we're in a exponential function, we really don't want big
            // numbers.
            if ctx.inside_exp > 0 {
                return Node::int(rng.gen_range(-3..4));
            }
            Node::int(rng.gen_range(-100..100))
        }
    }
}

fn random_binary(ctx: RecursiveCtx) -> Node {
    const OPS: [BinOp; 5] = [BinOp::Add, BinOp::Sub, BinOp::Mul, BinOp::Div, BinOp::Rem];
    let op = OPS[thread_rng().gen_range(0..OPS.len())];
    Node::binary(op, random_node(ctx.nested()), random_node(ctx.nested()))
}

fn random_call(ctx: RecursiveCtx) -> Node {
    const FUNCS: [Func; 8] = [
        Func::Sin,
        Func::Cos,
        Func::Tan,
        Func::Atan,
        Func::Abs,
        Func::Sqrt,
        Func::Log,
        Func::Radians,
    ];
    let func = FUNCS[thread_rng().gen_range(0..FUNCS.len())];
    let arg = if func.takes_angle() {
        random_node(ctx.for_trigo_call())
    } else {
        random_node(ctx.nested())
    };
    Node::call(func, arg)
}

fn random_node(ctx: RecursiveCtx) -> Node {
    let mut rng = thread_rng();
    // limit the amount of node depth
    if ctx.depth < 5 && rng.gen_range(0..10) > 2 {
        // pick a composite node
        match rng.gen_range(0..4) {
            0 | 1 => return random_binary(ctx),
            2 if ctx.inside_exp < 2 => {
                return random_node(ctx.for_exp_call()).pow(random_node(ctx.for_exp_call()))
            }
            3 => return random_call(ctx),
            _ => {}
        }
    }
    // pick leaf node
    match rng.gen_range(0..3) {
        0 => Node::Const(random_const(&ctx)),
        1 => -random_num(&ctx),
        _ => random_num(&ctx),
    }
}

impl RecursiveCtx {
    fn new() -> Self {
        Self {
            depth: 0,
            inside_trigo: false,
            inside_exp: 0,
        }
    }

    fn nested(&self) -> Self {
        Self {
            depth: self.depth + 1,
            inside_trigo: self.inside_trigo,
            inside_exp: self.inside_exp,
        }
    }

    fn for_trigo_call(&self) -> Self {
        Self {
            inside_trigo: true,
            ..self.nested()
        }
    }

    fn for_exp_call(&self) -> Self {
        Self {
            inside_exp: self.inside_exp + 1,
            ..self.nested()
        }
    }
}

fn is_close(a: &Value, b: &Value) -> bool {
    match (a.to_f64(), b.to_f64()) {
        (Ok(a), Ok(b)) => {
            let mut is_equal = (a - b).abs() < 1e-9;
            if a != 0.0 {
                is_equal |= ((a - b) / a).abs() < 1e-9;
            }
            is_equal
        }
        _ => a == b,
    }
}

fn main() {
    for i in 0..5000 {
        let node = random_node(RecursiveCtx::new());

        if i != 0 {
            println!();
        }
        let printed = node.to_string();
        println!("Testing {}:\n", printed);

        let reparsed = match parse(&printed) {
            Ok(reparsed) => reparsed,
            Err(err) => panic!("cannot read back `{}`: {}", printed, err),
        };
        println!("- read back as: {}", reparsed);

        match (node.eval(), reparsed.eval()) {
            (Ok(ground_truth), Ok(result)) => {
                println!("- eval: {} and {}", ground_truth, result);
                assert!(is_close(&ground_truth, &result));
            }
            (Err(a), Err(b)) => {
                println!("- eval: (error) {}", a);
                assert_eq!(a, b);
            }
            (a, b) => panic!("evaluations differ: {:?} and {:?}", a, b),
        }
    }
}
