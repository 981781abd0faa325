use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use geo::{LatLng, Radii};
use map_overlay::{Backend, Ellipse, EllipseOptions, Map, Size, WebMercator};
use rand::{Rng, SeedableRng};

fn setup(count: usize) -> (WebMercator, Vec<Ellipse>) {
    let mut rng = rand::rngs::StdRng::seed_from_u64(0xB3AC4);

    let size = Size::new(1024.0, 768.0);
    let center = LatLng::new_unchecked(48.42, -123.37);
    let transform = WebMercator::centered_on(center, 12.0, size);

    let ellipses = (0..count)
        .map(|_| {
            let center = LatLng::new_unchecked(
                48.42 + rng.random_range(-0.2..0.2),
                -123.37 + rng.random_range(-0.3..0.3),
            );
            let radii = Radii::new(rng.random_range(10.0..5000.0), rng.random_range(10.0..5000.0));

            Ellipse::new(
                center,
                Some(radii),
                Some(rng.random_range(-180.0..180.0)),
                EllipseOptions::default(),
            )
        })
        .collect();

    (transform, ellipses)
}

pub fn criterion_benchmark(c: &mut Criterion) {
    const COUNT: usize = 5000;

    let (transform, mut ellipses) = black_box(setup(COUNT));
    let map = Map::new(transform, Size::new(1024.0, 768.0));

    for backend in [Backend::Vector, Backend::Raster] {
        let geometry = map.geometry(backend);
        let id = BenchmarkId::new("project_and_emit", format!("{backend:?}-{COUNT}"));

        c.bench_with_input(id, &geometry, |b, geometry| {
            b.iter(|| {
                for ellipse in ellipses.iter_mut() {
                    // every ellipse has radii, so this can't fail
                    let _ = ellipse.project(Some(geometry));
                    black_box(ellipse.get_path_string());
                }
            });
        });
    }
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
