use criterion::{black_box, criterion_group, criterion_main, Criterion};
use haul_core::{LocationId, SimConfig};
use haul_dispatch::plan;
use haul_runtime::{Simulation, TruckOffer};

fn fleet_of(trucks: usize) -> Simulation {
    let cfg = SimConfig {
        starting_capital: rust_decimal::Decimal::new(10_000_000, 0),
        ..SimConfig::default()
    };
    let hub = LocationId::new("hub-0");
    let mut sim = Simulation::new_game(cfg, "BenchDispatch", &hub, 3).expect("bench game");
    for _ in 0..trucks {
        let truck = sim.buy_truck("man_tgx", TruckOffer::New, None).expect("truck");
        let trailer = sim.buy_trailer("semi_box", false, None).expect("trailer");
        sim.attach_trailer(&truck, &trailer).expect("coupling");
    }
    sim
}

fn bench_plan(c: &mut Criterion) {
    let sim = fleet_of(20);
    c.bench_function("plan 20 trucks full board", |b| {
        b.iter(|| black_box(plan(sim.ledger(), sim.geography())))
    });
}

criterion_group!(benches, bench_plan);
criterion_main!(benches);
