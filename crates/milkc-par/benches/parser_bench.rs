//! Parser throughput benchmark over a realistic per-pixel block.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use milkc_par::Parser;
use milkc_sem::SymbolTable;
use milkc_util::Handler;

const PER_PIXEL_BLOCK: &str = "\
zoom = zoom + 0.01*sin(rad*6.28 - time*2.0);\n\
rot = rot + 0.002*sin(ang*3.0);\n\
cx = cx + 0.05*sin(time*0.31)*rad;\n\
cy = cy + 0.05*cos(time*0.29)*rad;\n\
myvar = if(above(bass, 0.5), sqr(rad), bnot(treb));\n\
warp = warp*(1 - band(equal(frame % 2, 0), below(mid, 0.2)));\n";

fn bench_parser(c: &mut Criterion) {
    c.bench_function("parse_per_pixel_block", |b| {
        b.iter(|| {
            let handler = Handler::new();
            let mut symbols = SymbolTable::new();
            let node = Parser::from_source(black_box(PER_PIXEL_BLOCK), &mut symbols, &handler)
                .parse();
            assert!(!handler.has_errors());
            node
        })
    });
}

criterion_group!(benches, bench_parser);
criterion_main!(benches);
