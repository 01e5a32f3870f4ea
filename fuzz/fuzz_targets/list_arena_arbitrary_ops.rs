#![no_main]

use hitkit::ds::{ListArena, ListId, SlotId};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on a ListArena holding several lists
//
// Nodes are pushed, unlinked, relinked into other lists, inserted next to
// each other and freed; the arena's link structure is validated after every
// step.
fuzz_target!(|data: &[u8]| {
    if data.len() < 2 {
        return;
    }

    let mut arena: ListArena<u8> = ListArena::new();
    let mut lists: Vec<ListId> = vec![arena.new_list()];
    let mut ids: Vec<SlotId> = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 10;
        let value = pair[1];
        let list = lists[value as usize % lists.len()];
        let id = (!ids.is_empty()).then(|| ids[value as usize % ids.len()]);

        match op {
            0 => {
                // push_head
                if let Some(id) = arena.push_head(list, value) {
                    assert_eq!(arena.head(list), Some(id));
                    assert_eq!(arena.owner(id), Some(list));
                    ids.push(id);
                }
            },
            1 => {
                // push_tail
                if let Some(id) = arena.push_tail(list, value) {
                    assert_eq!(arena.tail(list), Some(id));
                    ids.push(id);
                }
            },
            2 => {
                // remove_self
                if let Some(id) = id {
                    let was_attached = arena.owner(id).is_some();
                    assert_eq!(arena.remove_self(id), was_attached);
                    assert_eq!(arena.owner(id), None);
                    assert!(arena.contains(id));
                }
            },
            3 => {
                // relink into another list
                if let Some(id) = id {
                    if arena.push_tail_node(list, id) {
                        assert_eq!(arena.tail(list), Some(id));
                        assert_eq!(arena.owner(id), Some(list));
                    }
                }
            },
            4 => {
                // insert_previous
                if let Some(id) = id {
                    if let Some(new_id) = arena.insert_previous(id, value) {
                        assert_eq!(arena.next(new_id), Some(id));
                        ids.push(new_id);
                    }
                }
            },
            5 => {
                // insert_next
                if let Some(id) = id {
                    if let Some(new_id) = arena.insert_next(id, value) {
                        assert_eq!(arena.previous(new_id), Some(id));
                        ids.push(new_id);
                    }
                }
            },
            6 => {
                // free
                if let Some(id) = id {
                    if arena.free(id).is_some() {
                        ids.retain(|&other| other != id);
                        assert!(!arena.contains(id));
                    }
                }
            },
            7 => {
                // new_list
                if lists.len() < 8 {
                    lists.push(arena.new_list());
                }
            },
            8 => {
                // drop_list (only succeeds when empty)
                let empty = arena.is_empty(list);
                if lists.len() > 1 && arena.drop_list(list) {
                    assert!(empty);
                    lists.retain(|&other| other != list);
                }
            },
            9 => {
                // walk both directions
                let forward: Vec<_> = arena.iter_ids(list).collect();
                assert_eq!(forward.len(), arena.len(list));
                let mut backward = Vec::new();
                let mut cursor = arena.tail(list);
                while let Some(id) = cursor {
                    backward.push(id);
                    cursor = arena.previous(id);
                }
                backward.reverse();
                assert_eq!(forward, backward);
            },
            _ => unreachable!(),
        }

        arena.debug_validate_invariants();
    }
});
