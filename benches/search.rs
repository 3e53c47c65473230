use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use mondrain::config::{LayoutConfig, RenderConfig, SearchStrategy};
use mondrain::ir::NetworkSpec;
use mondrain::layout::compute_layout;
use mondrain::layout_dump::LayoutDump;
use mondrain::render::render_svg;
use mondrain::theme::Theme;
use std::hint::black_box;

fn network(name: &str) -> NetworkSpec {
    match name {
        "x_2_2" => NetworkSpec::new([2, 2]),
        "square_3_3" => NetworkSpec::new([3, 3]),
        "square_4_4" => NetworkSpec::new([4, 4]),
        "bulge_3_4_3" => NetworkSpec::new([3, 4, 3]),
        "wide_5_5" => NetworkSpec::new([5, 5]),
        "deep_3_3_3_3" => NetworkSpec::new([3, 3, 3, 3]),
        "skewed_3_4_2" => NetworkSpec::new([3, 4, 2]).with_x_locations([0.0, 1.5, 2.0]),
        _ => panic!("unknown network"),
    }
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");
    for name in [
        "x_2_2",
        "square_3_3",
        "square_4_4",
        "bulge_3_4_3",
        "wide_5_5",
        "deep_3_3_3_3",
        "skewed_3_4_2",
    ] {
        let spec = network(name);
        for strategy in [SearchStrategy::Adjacency, SearchStrategy::Exhaustive] {
            let config = LayoutConfig {
                strategy,
                ..LayoutConfig::default()
            };
            let id = BenchmarkId::new(format!("{strategy:?}").to_lowercase(), name);
            group.bench_with_input(id, &spec, |b, data| {
                b.iter(|| {
                    let layout = compute_layout(black_box(data), &config).expect("layout failed");
                    black_box(layout.shapes.len());
                });
            });
        }
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let theme = Theme::de_stijl();
    let render = RenderConfig {
        shape_density: 0.5,
        seed: Some(7),
        ..RenderConfig::default()
    };
    for name in ["square_4_4", "bulge_3_4_3", "wide_5_5"] {
        let layout =
            compute_layout(&network(name), &LayoutConfig::default()).expect("layout failed");
        let dump = LayoutDump::from_layout(&layout);
        group.bench_with_input(BenchmarkId::from_parameter(name), &dump, |b, data| {
            b.iter(|| {
                let svg = render_svg(black_box(data), &theme, &render);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_search, bench_render);
criterion_main!(benches);
