use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use interop::ncss::{Descriptor, Map, PseudoClasses, StyleRule, StyleSheet};
use interop::resolve_value;
use interop::testing::TestHarness;

fn calc_tokens(items: &[&str]) -> Vec<Descriptor> {
    items
        .iter()
        .map(|item| match item.parse::<f64>() {
            Ok(n) => Descriptor::Number(n),
            Err(_) => Descriptor::from(*item),
        })
        .collect()
}

fn bench_descriptors(c: &mut Criterion) {
    let mut sheet = StyleSheet::new();
    sheet
        .set_root_variable("--gap", "8px")
        .set_universal_variable("--channels", "120 40 200");
    let harness = TestHarness::new(sheet);

    let cases = [
        ("literal_px", Descriptor::from("16px")),
        (
            "calc_nested",
            Descriptor::function(
                "calc",
                calc_tokens(&["2", "*", "(", "3", "+", "4", ")", "-", "1"]),
            ),
        ),
        ("var_root", Descriptor::var("--gap", None)),
        (
            "var_fallback_chain",
            Descriptor::var(
                "--missing",
                Some(Descriptor::var("--also-missing", Some("4px".into()))),
            ),
        ),
        (
            "rgb_from_var",
            Descriptor::function(
                "rgb",
                [Descriptor::var("--channels", None), Descriptor::from(0.5)],
            ),
        ),
        (
            "clamp",
            Descriptor::function(
                "clamp",
                [
                    Descriptor::from(10),
                    Descriptor::function("vw", [5.into()]),
                    Descriptor::from(40),
                ],
            ),
        ),
    ];

    let mut group = c.benchmark_group("resolve_value");
    for (name, descriptor) in cases {
        group.bench_with_input(BenchmarkId::new("descriptor", name), &descriptor, |b, d| {
            b.iter(|| {
                let (state, refs, mut tracking) = harness.pass_inputs(Map::new());
                black_box(resolve_value(
                    &state,
                    &refs,
                    &mut tracking,
                    Some(black_box(d)),
                    None,
                    false,
                ))
            })
        });
    }
    group.finish();
}

fn bench_hover_toggle(c: &mut Criterion) {
    let mut sheet = StyleSheet::new();
    sheet
        .add_rule("text-blue", StyleRule::new().declare("color", "blue"))
        .add_rule(
            "hover:text-red",
            StyleRule::new()
                .declare("color", "red")
                .with_pseudo_classes(PseudoClasses::HOVER),
        );
    let harness = TestHarness::new(sheet);
    let component = harness
        .render("text-blue hover:text-red")
        .expect("component renders");

    let mut hover = false;
    c.bench_function("hover_toggle", |b| {
        b.iter(|| {
            hover = !hover;
            component.set_hover(black_box(hover));
        })
    });
}

criterion_group!(benches, bench_descriptors, bench_hover_toggle);
criterion_main!(benches);
