use std::collections::BTreeMap;

use rand::{
    Rng,
    rngs::StdRng,
    seq::{IndexedRandom, SliceRandom},
};

use crate::maze::{Cell, Maze, Orientation};

/// Probability that two adjacent cells in different sets get merged.
const MERGE_PROBABILITY: f64 = 0.5;

/// Carves the maze row by row, top to bottom.
pub(super) fn carve(maze: &mut Maze, rng: &mut StdRng) {
    let last = maze.height() - 1;

    // All rows except last: label every cell, merge some adjacent sets, then
    // open exits into the row below.
    for y in 0..last {
        populate_missing_sets(maze.row_mut(y), rng);
        merge_random_sets_in(maze, y, MERGE_PROBABILITY, rng);
        add_set_exits(maze, y, rng);
    }

    // The last row has no row below it to pick up further connections, so
    // every remaining set is merged into one.
    populate_missing_sets(maze.row_mut(last), rng);
    merge_random_sets_in(maze, last, 1.0, rng);
    tracing::debug!("[gen] merged last row into a single set");
}

/// Ensures every cell in the row has a set label, assigning shuffled
/// previously-unused labels to the cells that lack one.
///
/// The label pool is `1..=width`, as large as the row itself, so it cannot
/// run dry even when no cell was pre-labeled from the row above.
fn populate_missing_sets(row: &mut [Cell], rng: &mut StdRng) {
    let width = row.len() as u8;
    let in_use = row.iter().filter_map(|cell| cell.set).collect::<Vec<_>>();
    let mut available = (1..=width)
        .filter(|label| !in_use.contains(label))
        .collect::<Vec<_>>();
    available.shuffle(rng);

    let mut fresh = available.into_iter();
    row.iter_mut()
        .filter(|cell| cell.set.is_none())
        .for_each(|cell| cell.set = Some(fresh.next().expect("label pool exhausted")));
}

/// Rewrites every cell in the row holding `old` to `new`.
fn merge_set_with(row: &mut [Cell], old: u8, new: u8) {
    row.iter_mut()
        .filter(|cell| cell.set == Some(old))
        .for_each(|cell| cell.set = Some(new));
}

/// Randomly merges adjacent disjoint sets in the row at `y`, opening the
/// shared wall of every merged pair.
///
/// One value is drawn per adjacent pair regardless of outcome, so a row of
/// width w always consumes exactly w - 1 draws and seeded replay stays
/// aligned. Pairs that already share a set keep their wall: opening another
/// passage between connected cells would introduce a loop.
fn merge_random_sets_in(maze: &mut Maze, y: u8, probability: f64, rng: &mut StdRng) {
    for x in 0..maze.width() - 1 {
        let draw = rng.random::<f64>();
        let (current, next) = (maze[(x, y)].set, maze[(x + 1, y)].set);
        if current == next || draw > probability {
            continue;
        }
        if let (Some(new), Some(old)) = (current, next) {
            merge_set_with(maze.row_mut(y), old, new);
            maze.open_passage_after((x, y), Orientation::Vertical);
        }
    }
}

/// Opens at least one exit from every set in the row at `y` into the row
/// below, propagating the set label to each cell an exit lands on.
///
/// Runs strictly after the merge step, so the groups reflect post-merge sets.
/// The exit count is resampled per group between 1 and the group size; the
/// lower bound is what keeps every row segment reachable from below.
fn add_set_exits(maze: &mut Maze, y: u8, rng: &mut StdRng) {
    // Group the row's cells by set, in ascending label order
    let mut sets: BTreeMap<u8, Vec<u8>> = BTreeMap::new();
    for cell in maze.row(y) {
        if let Some(label) = cell.set {
            sets.entry(label).or_default().push(cell.x);
        }
    }

    for (label, columns) in sets {
        let draw = rng.random::<f64>();
        let count = ((draw * columns.len() as f64).ceil() as usize).clamp(1, columns.len());
        let exits = columns
            .choose_multiple(rng, count)
            .copied()
            .collect::<Vec<_>>();
        for x in exits {
            maze.open_passage_after((x, y), Orientation::Horizontal);
            maze[(x, y + 1)].set = Some(label);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_populate_fills_the_whole_row() {
        let mut maze = Maze::new(6, 1, true);
        let mut rng = StdRng::seed_from_u64(0);
        populate_missing_sets(maze.row_mut(0), &mut rng);

        let labels = maze
            .row(0)
            .iter()
            .map(|cell| cell.set.expect("cell left unlabeled"))
            .collect::<Vec<_>>();
        assert!(labels.iter().all(|&label| (1..=6).contains(&label)));
        // Fresh labels are distinct
        let mut sorted = labels.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(sorted.len(), 6);
    }

    #[test]
    fn test_populate_keeps_existing_labels() {
        let mut maze = Maze::new(5, 1, true);
        maze.row_mut(0)[2].set = Some(3);
        let mut rng = StdRng::seed_from_u64(1);
        populate_missing_sets(maze.row_mut(0), &mut rng);

        assert_eq!(maze.row(0)[2].set, Some(3));
        // The in-use label is not handed out again
        let reused = maze
            .row(0)
            .iter()
            .filter(|cell| cell.set == Some(3))
            .count();
        assert_eq!(reused, 1);
        assert!(maze.row(0).iter().all(|cell| cell.set.is_some()));
    }

    #[test]
    fn test_merge_set_with_overwrites_every_member() {
        let mut maze = Maze::new(4, 1, true);
        let labels = [1, 2, 1, 3];
        for (cell, label) in maze.row_mut(0).iter_mut().zip(labels) {
            cell.set = Some(label);
        }
        merge_set_with(maze.row_mut(0), 1, 3);

        let merged = maze
            .row(0)
            .iter()
            .map(|cell| cell.set.unwrap())
            .collect::<Vec<_>>();
        assert_eq!(merged, vec![3, 2, 3, 3]);
    }

    #[test]
    fn test_merge_with_certainty_unifies_the_row() {
        let mut maze = Maze::new(7, 1, true);
        let mut rng = StdRng::seed_from_u64(2);
        populate_missing_sets(maze.row_mut(0), &mut rng);
        merge_random_sets_in(&mut maze, 0, 1.0, &mut rng);

        let first = maze.row(0)[0].set;
        assert!(maze.row(0).iter().all(|cell| cell.set == first));
        // Every pair started in different sets, so every shared wall is open
        for x in 0..6 {
            assert!(!maze.is_wall_after((x, 0), Orientation::Vertical));
        }
    }

    #[test]
    fn test_merged_cells_keep_their_wall() {
        let mut maze = Maze::new(3, 1, true);
        for cell in maze.row_mut(0).iter_mut() {
            cell.set = Some(1);
        }
        let mut rng = StdRng::seed_from_u64(3);
        merge_random_sets_in(&mut maze, 0, 1.0, &mut rng);

        // Already-connected cells must not lose another wall
        assert!(maze.is_wall_after((0, 0), Orientation::Vertical));
        assert!(maze.is_wall_after((1, 0), Orientation::Vertical));
    }

    #[test]
    fn test_every_set_gets_an_exit() {
        for seed in [0, 4, 17, 123] {
            let mut maze = Maze::new(8, 2, true);
            let mut rng = StdRng::seed_from_u64(seed);
            populate_missing_sets(maze.row_mut(0), &mut rng);
            merge_random_sets_in(&mut maze, 0, MERGE_PROBABILITY, &mut rng);
            add_set_exits(&mut maze, 0, &mut rng);

            let mut exits_per_set: BTreeMap<u8, usize> = BTreeMap::new();
            for cell in maze.row(0) {
                let exits = exits_per_set.entry(cell.set.unwrap()).or_default();
                if !cell.bottom {
                    *exits += 1;
                }
            }
            assert!(
                exits_per_set.values().all(|&exits| exits >= 1),
                "set without a downward exit (seed {})",
                seed
            );
        }
    }

    #[test]
    fn test_exits_propagate_labels_downward() {
        let mut maze = Maze::new(8, 2, true);
        let mut rng = StdRng::seed_from_u64(5);
        populate_missing_sets(maze.row_mut(0), &mut rng);
        merge_random_sets_in(&mut maze, 0, MERGE_PROBABILITY, &mut rng);
        add_set_exits(&mut maze, 0, &mut rng);

        for x in 0..8 {
            let above = maze[(x, 0)];
            let below = maze[(x, 1)];
            if above.bottom {
                assert!(below.top);
                assert_eq!(below.set, None);
            } else {
                assert!(!below.top);
                assert_eq!(below.set, above.set);
            }
        }
    }
}
