use std::{collections::HashSet, fs};

use gol_console::{
    Coord, Generation, Glyphs, Simulation, State, WorldSize,
    args::{self, import_seed},
    patterns,
    render::{FrameSink, NullSink, render_to_string},
    simulation::evolve,
};
use rand::{SeedableRng, rngs::StdRng};

fn frame(rows: &[&str]) -> String {
    rows.iter().map(|row| format!("{row}\n")).collect()
}

#[test]
fn blinker_frames_alternate() {
    let size = WorldSize::new(5, 5);
    let alive = patterns::get_pattern("blinker", size).unwrap();
    let initial = Generation::from_alive(size, &alive);

    let mut sink = FrameSink::default();
    let summary = Simulation::new().run(3, initial.clone(), &mut sink);

    let horizontal = frame(&["#####", "#---#", "#XXX#", "#---#", "#####"]);
    let vertical = frame(&["#####", "#-X-#", "#-X-#", "#-X-#", "#####"]);
    assert_eq!(sink.frames(), [horizontal.clone(), vertical.clone(), horizontal]);
    assert_eq!(render_to_string(&summary.generation, &Glyphs::default()), vertical);
}

#[test]
fn border_never_gains_state() {
    let mut rng = StdRng::seed_from_u64(99);
    let size = WorldSize::new(30, 20);
    let initial = Generation::populate(size, None, &mut rng);

    for generation in evolve(initial).take(40) {
        for (coord, cell) in generation.iter() {
            assert_eq!(size.is_border(coord), cell.state().is_none(), "{coord}");
        }
    }
}

#[test]
fn glider_crashes_into_border_and_settles() {
    let size = WorldSize::new(8, 8);
    let alive: HashSet<Coord> = [(1, 2), (2, 3), (3, 1), (3, 2), (3, 3)]
        .into_iter()
        .map(Coord::from)
        .collect();
    let summary = Simulation::new().run(60, Generation::from_alive(size, &alive), &mut NullSink);

    let settled = summary.generation.next();
    assert_eq!(settled, summary.generation);
    let block: Vec<Coord> = [(5, 5), (5, 6), (6, 5), (6, 6)].into_iter().map(Coord::from).collect();
    assert_eq!(summary.generation.alive_cells().collect::<Vec<_>>(), block);
}

#[test]
fn seed_file_drives_simulation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("toad.txt");
    fs::write(&path, "......\n..XXX.\n.XXX..\n......\n").unwrap();

    let seed = import_seed(&path, 'X').unwrap();
    assert_eq!(seed.size, WorldSize::new(8, 6));

    let mut rng = StdRng::seed_from_u64(0);
    let initial = Generation::populate(seed.size, seed.alive.as_ref(), &mut rng);
    let summary = Simulation::new().run(2, initial.clone(), &mut NullSink);
    assert_eq!(summary.generation, initial);

    let export = dir.path().join("toad.json");
    args::export_seed(&initial.next(), &export).unwrap();
    let reloaded = import_seed(&export, 'X').unwrap();
    let phase_two = Generation::from_alive(reloaded.size, reloaded.alive.as_ref().unwrap());
    assert_eq!(phase_two.next(), initial);
    assert_eq!(phase_two.state(Coord::new(1, 4)), Some(State::Alive));
}
