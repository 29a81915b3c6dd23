//! Keep a scroll position anchored while history items stream in.
//!
//! Items arrive out of order keyed by their `hid`, the list is rendered newest
//! first, and the viewport asks which rendered row to resume from.

use ordered_index::{Direction, OrderedIndex};

#[derive(Debug, Clone)]
struct Item {
    hid: u32,
    name: String,
}

fn main() {
    let mut index = OrderedIndex::new();

    // updates come from the feed in whatever order the server sends them
    for hid in [12u32, 3, 40, 7, 25, 18, 1, 33] {
        index.set(
            hid,
            Item {
                hid,
                name: format!("dataset {hid}"),
            },
        );
    }

    // a later update for an existing hid overwrites it in place
    index.set(
        7,
        Item {
            hid: 7,
            name: "dataset 7 (renamed)".into(),
        },
    );

    let sorted = index.into_sorted(Direction::Descending);
    let rows = sorted.iter().map(|(_, item)| item.clone()).collect::<Vec<_>>();

    for target in [30, 8, 0, 100] {
        match sorted.find_closest_key(target) {
            Some(closest) => {
                let row = &rows[closest.index];
                println!(
                    "target {target:>3} -> row {} (hid {}, {})",
                    closest.index, row.hid, row.name
                );
            }
            None => println!("target {target:>3} -> nothing rendered"),
        }
    }
}
