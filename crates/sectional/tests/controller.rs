//! End-to-end tests driving a [`ListController`] against a recording host.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sectional::{ListController, ListProperties, ViewHost};
use sectional_core::{
    Content, ElementKey, HeaderFooter, IndexPath, Item, ItemReordering, PagingBehavior, Point,
    ReorderResult, Section, SelectionStyle, Sizing,
};
use sectional_layout::{Appearance, SelectionMode, Viewport};
use sectional_testing::{
    rows_content, CoordinatedRow, CoordinatorLog, ImmediateScheduler, RecordingHost, TestHeader,
    TestRow,
};

fn controller(host: &Rc<RefCell<RecordingHost>>) -> ListController {
    ListController::new(host.clone(), Rc::new(ImmediateScheduler))
}

fn fixed_row(id: u32, text: &str, height: f32) -> Item<TestRow> {
    let mut item = Item::new(TestRow::new(id, text));
    item.sizing = Sizing::fixed_height(height);
    item
}

fn fixed_header(title: &str, height: f32) -> HeaderFooter<TestHeader> {
    let mut header = HeaderFooter::new(TestHeader::new(title));
    header.sizing = Sizing::fixed_height(height);
    header
}

#[test]
fn test_first_configure_inserts_everything() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = rows_content(&[("a", &[(1, "one"), (2, "two")])]);
    }));

    let host = host.borrow();
    let (batch, _) = host.last_batch().expect("a batch was dispatched");
    assert_eq!(batch.inserted_sections.as_slice(), &[0]);
    assert_eq!(
        batch.inserted_items.as_slice(),
        &[IndexPath::new(0, 0), IndexPath::new(0, 1)]
    );
    assert!(batch.deleted_items.is_empty());
    assert!(!host.scroll_view_properties.is_empty());
}

#[test]
fn test_reconfiguring_identical_content_dispatches_nothing() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    let content = || rows_content(&[("a", &[(1, "one"), (2, "two")]), ("b", &[(3, "three")])]);

    controller.configure(ListProperties::new(|properties| {
        properties.content = content();
    }));
    let first_size = host.borrow().last_content_size();
    let batches_after_first = host.borrow().batches.len();

    controller.configure(ListProperties::new(|properties| {
        properties.content = content();
    }));

    let host = host.borrow();
    assert_eq!(host.batches.len(), batches_after_first);
    assert_eq!(host.last_content_size(), first_size);
}

#[test]
fn test_full_vertical_placement() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 1000.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = Content::new(|content| {
            content.header = Some(fixed_header("list header", 50.0).into_any());
            content.footer = Some(fixed_header("list footer", 70.0).into_any());

            content.add(Section::with("one", |section| {
                section.header = Some(fixed_header("header", 55.0).into_any());
                section.footer = Some(fixed_header("footer", 45.0).into_any());
                section.add_item(fixed_row(1, "a", 20.0));
            }));

            content.add(Section::with("two", |section| {
                section.add_item(fixed_row(2, "b", 40.0));
                section.add_item(fixed_row(3, "c", 60.0));
            }));
        });
    }));

    let host = host.borrow();
    let frame = |key| host.frame(key).expect("frame applied");

    let list_header = frame(ElementKey::ListHeader);
    assert_eq!((list_header.y, list_header.height), (0.0, 50.0));

    let section_header = frame(ElementKey::SectionHeader(0));
    assert_eq!((section_header.y, section_header.height), (50.0, 55.0));

    let item = frame(ElementKey::Item(IndexPath::new(0, 0)));
    assert_eq!((item.y, item.height, item.width), (105.0, 20.0, 200.0));

    let section_footer = frame(ElementKey::SectionFooter(0));
    assert_eq!((section_footer.y, section_footer.height), (125.0, 45.0));

    let second_first = frame(ElementKey::Item(IndexPath::new(1, 0)));
    assert_eq!((second_first.y, second_first.height), (170.0, 40.0));

    let second_second = frame(ElementKey::Item(IndexPath::new(1, 1)));
    assert_eq!((second_second.y, second_second.height), (210.0, 60.0));

    let list_footer = frame(ElementKey::ListFooter);
    assert_eq!((list_footer.y, list_footer.height), (270.0, 70.0));

    let content_size = host.last_content_size().expect("content size announced");
    assert_eq!((content_size.width, content_size.height), (200.0, 340.0));

    // Headers stack over items, items over footers.
    assert!(host.z_index(ElementKey::SectionHeader(0)) > host.z_index(ElementKey::Item(IndexPath::ZERO)));
    assert!(host.z_index(ElementKey::Item(IndexPath::ZERO)) > host.z_index(ElementKey::SectionFooter(0)));
}

#[test]
fn test_coordinator_survives_cross_section_move() {
    let log: CoordinatorLog = Rc::new(RefCell::new(Vec::new()));
    let live = Rc::new(Cell::new(0));

    let content = |layout: &[(&'static str, &[u32])]| {
        let log = log.clone();
        let live = live.clone();
        Content::new(move |content| {
            for &(id, items) in layout {
                content.add(Section::with(id, |section| {
                    for &item in items {
                        section.add(CoordinatedRow::new(item, format!("row {item}"), &log, &live));
                    }
                }));
            }
        })
    };

    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = content(&[("a", &[1, 2]), ("b", &[3])]);
    }));
    assert_eq!(live.get(), 3);

    // Item 1 moves from section "a" to section "b"; its coordinator must
    // ride along rather than being torn down and recreated.
    controller.configure(ListProperties::new(|properties| {
        properties.content = content(&[("a", &[2]), ("b", &[3, 1])]);
    }));

    assert_eq!(live.get(), 3);
    let log = log.borrow();
    assert_eq!(log.iter().filter(|e| e.ends_with(":created")).count(), 3);
    assert!(!log.iter().any(|e| e.ends_with(":removed")));
}

#[test]
fn test_paged_content_widens_as_scrolling_nears_the_end() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = Content::new(|content| {
            content.paging_behavior = PagingBehavior::Paged { page_size: 250 };
            content.add(Section::with("large", |section| {
                for id in 0..600 {
                    section.add_item(fixed_row(id, "row", 10.0));
                }
            }));
        });
    }));

    assert_eq!(controller.presented_item_count(), 250);

    // 250 rows of 10pt: presented end at 2500. Scrolling within one
    // viewport of it pages the next window in.
    controller.set_viewport(Viewport {
        size: sectional_core::Size::new(200.0, 600.0),
        content_offset: Point::new(0.0, 1400.0),
    });

    assert_eq!(controller.presented_item_count(), 499);
}

#[test]
fn test_sticky_header_pins_and_clamps() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    let size = sectional_core::Size::new(200.0, 100.0);
    controller.set_viewport(Viewport::new(size));

    controller.configure(ListProperties::new(|properties| {
        properties.appearance = Appearance::new(|appearance| {
            appearance.sticky_section_headers = true;
        });
        properties.content = Content::new(|content| {
            content.header = Some(fixed_header("list header", 50.0).into_any());
            content.add(Section::with("one", |section| {
                section.header = Some(fixed_header("header", 15.0).into_any());
                for id in 0..10 {
                    section.add_item(fixed_row(id, "row", 12.0));
                }
            }));
            content.add(Section::with("two", |section| {
                for id in 10..20 {
                    section.add_item(fixed_row(id, "row", 12.0));
                }
            }));
        });
    }));

    // At rest the header sits at its natural origin.
    assert_eq!(host.borrow().frame(ElementKey::SectionHeader(0)).unwrap().y, 50.0);

    // Scrolled into the section, it pins to the viewport's leading edge.
    controller.set_viewport(Viewport {
        size,
        content_offset: Point::new(0.0, 80.0),
    });
    assert_eq!(host.borrow().frame(ElementKey::SectionHeader(0)).unwrap().y, 80.0);

    // Scrolled past the section, it clamps to the section's trailing edge
    // minus its own extent. Section one: header 15 + ten 12pt rows = 135,
    // starting at 50.
    controller.set_viewport(Viewport {
        size,
        content_offset: Point::new(0.0, 400.0),
    });
    assert_eq!(host.borrow().frame(ElementKey::SectionHeader(0)).unwrap().y, 170.0);
}

#[test]
fn test_scrolling_takes_the_cheap_layout_pass() {
    use sectional::Instrumentation;

    #[derive(Default)]
    struct PassCounter {
        full_passes: Cell<usize>,
    }

    impl Instrumentation for PassCounter {
        fn begin(&self, label: &'static str) {
            if label == "layout" {
                self.full_passes.set(self.full_passes.get() + 1);
            }
        }
    }

    let counter = Rc::new(PassCounter::default());
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_instrumentation(counter.clone());

    let size = sectional_core::Size::new(200.0, 100.0);
    controller.set_viewport(Viewport::new(size));

    controller.configure(ListProperties::new(|properties| {
        properties.appearance = Appearance::new(|appearance| {
            appearance.sticky_section_headers = true;
        });
        properties.content = Content::new(|content| {
            content.add(Section::with("a", |section| {
                section.header = Some(fixed_header("header", 15.0).into_any());
                for id in 0..10 {
                    section.add_item(fixed_row(id, "row", 12.0));
                }
            }));
        });
    }));
    let after_configure = counter.full_passes.get();

    // Scrolling only repositions the existing layout content; no rebuild.
    controller.set_viewport(Viewport {
        size,
        content_offset: Point::new(0.0, 40.0),
    });
    assert_eq!(counter.full_passes.get(), after_configure);

    // The cheap pass still folds scroll position into the geometry: the
    // sticky header is pinned to the new offset.
    assert_eq!(host.borrow().frame(ElementKey::SectionHeader(0)).unwrap().y, 40.0);

    // A size change invalidates the measurement basis and rebuilds.
    controller.set_viewport(Viewport {
        size: sectional_core::Size::new(200.0, 150.0),
        content_offset: Point::new(0.0, 40.0),
    });
    assert_eq!(counter.full_passes.get(), after_configure + 1);
}

#[test]
fn test_fill_sized_items_get_finite_geometry() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = Content::new(|content| {
            content.add(Section::with("a", |section| {
                let mut item = Item::new(TestRow::new(1, "fill"));
                item.sizing = Sizing::Fill;
                section.add_item(item);
            }));
        });
    }));

    let host = host.borrow();
    let frame = host.frame(ElementKey::Item(IndexPath::ZERO)).unwrap();
    assert!(frame.height.is_finite());
    // Unbounded along the scroll axis, fill falls back to the default
    // item extent; across it, fill takes the resolved width.
    assert_eq!(frame.height, 50.0);
    assert_eq!(frame.width, 200.0);

    let content_size = host.last_content_size().unwrap();
    assert!(content_size.height.is_finite());
    assert_eq!(content_size.height, 50.0);
}

#[test]
fn test_interactive_move_emits_exactly_one_result() {
    let results: Rc<RefCell<Vec<ReorderResult>>> = Rc::new(RefCell::new(Vec::new()));
    let section_results: Rc<RefCell<Vec<ReorderResult>>> = Rc::new(RefCell::new(Vec::new()));

    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = Content::new(|content| {
            content.add(Section::with("a", |section| {
                for id in 0..2 {
                    let mut item = fixed_row(id, "row", 10.0);
                    item.reordering = Some(ItemReordering { can_reorder_to: None });
                    let results = results.clone();
                    item.callbacks.on_was_reordered =
                        Some(Rc::new(move |result| results.borrow_mut().push(*result)));
                    section.add_item(item);
                }
            }));
            content.add(Section::with("b", |section| {
                let section_results = section_results.clone();
                section.callbacks.on_item_reordered =
                    Some(Rc::new(move |result| section_results.borrow_mut().push(*result)));
                for id in 2..4 {
                    section.add_item(fixed_row(id, "row", 10.0));
                }
            }));
        });
    }));

    assert!(controller.begin_interactive_move(IndexPath::new(0, 0)));

    // Dragged through an intermediate position before settling.
    assert_eq!(
        controller.update_interactive_move(IndexPath::new(1, 0)),
        IndexPath::new(1, 0)
    );
    assert_eq!(
        controller.update_interactive_move(IndexPath::new(1, 1)),
        IndexPath::new(1, 1)
    );

    let result = controller.end_interactive_move().expect("the move changed the order");
    assert_eq!(
        result,
        ReorderResult {
            from: IndexPath::new(0, 0),
            to: IndexPath::new(1, 1),
        }
    );

    assert_eq!(results.borrow().as_slice(), &[result]);
    assert_eq!(section_results.borrow().as_slice(), &[result]);

    // The committed content reflects the new order.
    assert_eq!(controller.content().sections[0].len(), 1);
    assert_eq!(controller.content().sections[1].len(), 3);
}

#[test]
fn test_move_veto_keeps_item_in_place() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = Content::new(|content| {
            content.add(Section::with("a", |section| {
                for id in 0..3 {
                    let mut item = fixed_row(id, "row", 10.0);
                    item.reordering = Some(ItemReordering {
                        // Never leaves the first section.
                        can_reorder_to: Some(Rc::new(|to: IndexPath| to.section == 0)),
                    });
                    section.add_item(item);
                }
            }));
            content.add(Section::with("b", |section| {
                section.add_item(fixed_row(10, "row", 10.0));
            }));
        });
    }));

    assert!(controller.begin_interactive_move(IndexPath::new(0, 0)));

    assert_eq!(
        controller.update_interactive_move(IndexPath::new(1, 0)),
        IndexPath::new(0, 0)
    );
    assert_eq!(
        controller.update_interactive_move(IndexPath::new(0, 2)),
        IndexPath::new(0, 2)
    );

    let result = controller.end_interactive_move().unwrap();
    assert_eq!(result.to, IndexPath::new(0, 2));
}

#[test]
#[should_panic(expected = "not supported")]
fn test_cancelling_a_move_panics() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);

    controller.cancel_interactive_move();
}

#[test]
fn test_single_selection_displaces_previous_selection() {
    let log: CoordinatorLog = Rc::new(RefCell::new(Vec::new()));
    let live = Rc::new(Cell::new(0));

    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.behavior.selection_mode = SelectionMode::Single;
        properties.content = Content::new(|content| {
            content.add(Section::with("a", |section| {
                for id in 0..2 {
                    let mut item = Item::new(CoordinatedRow::new(id, "row", &log, &live));
                    item.selection_style = SelectionStyle::Selectable { is_selected: false };
                    section.add_item(item);
                }
            }));
        });
    }));

    controller.select_item(IndexPath::new(0, 1));
    controller.select_item(IndexPath::new(0, 0));

    let log = log.borrow();
    let selection_events: Vec<_> = log
        .iter()
        .filter(|e| e.contains("selected"))
        .cloned()
        .collect();
    assert_eq!(selection_events, vec!["1:selected", "1:deselected", "0:selected"]);
}

#[test]
fn test_visible_views_are_reapplied_when_content_changes() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = rows_content(&[("a", &[(1, "before")])]);
    }));

    let view = host
        .borrow_mut()
        .create_or_reuse_view(sectional_core::ReuseKey::of::<TestRow>());
    controller.will_display(ElementKey::Item(IndexPath::ZERO), view);
    assert_eq!(host.borrow().view(view).applied, vec!["before"]);

    controller.configure(ListProperties::new(|properties| {
        properties.content = rows_content(&[("a", &[(1, "after")])]);
    }));

    assert_eq!(host.borrow().view(view).applied, vec!["before", "after"]);
}

#[test]
fn test_auto_scroll_fires_only_for_inserted_target() {
    use sectional::{AutoScrollAction, ScrollPosition};
    use sectional_core::AnyIdentifier;

    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 100.0)));

    let content = |count: u32| {
        Content::new(move |content| {
            content.add(Section::with("a", |section| {
                for id in 0..count {
                    section.add_item(fixed_row(id, "row", 50.0));
                }
            }));
        })
    };
    let scroll_to_last = |count: u32| AutoScrollAction::ScrollToOnInsert {
        identifier: AnyIdentifier::new::<TestRow, _>(count - 1),
        position: ScrollPosition::Bottom,
        animated: false,
    };

    controller.configure(ListProperties::new(|properties| {
        properties.content = content(4);
        properties.auto_scroll = scroll_to_last(4);
    }));
    let scrolls_after_insert = host.borrow().scrolls.len();
    assert_eq!(scrolls_after_insert, 1);
    // Four 50pt rows against a 100pt viewport: the last row's bottom at
    // 200 lands at the viewport's bottom edge.
    assert_eq!(host.borrow().scrolls[0].0, Point::new(0.0, 100.0));

    // The target already exists; reconfiguring must not scroll again.
    controller.configure(ListProperties::new(|properties| {
        properties.content = content(4);
        properties.auto_scroll = scroll_to_last(4);
    }));
    assert_eq!(host.borrow().scrolls.len(), scrolls_after_insert);
}

#[test]
fn test_measured_content_size_leaves_live_state_alone() {
    let host = RecordingHost::shared();
    let mut controller = controller(&host);
    controller.set_viewport(Viewport::new(sectional_core::Size::new(200.0, 600.0)));

    controller.configure(ListProperties::new(|properties| {
        properties.content = rows_content(&[("a", &[(1, "one")])]);
    }));
    let presented = controller.presented_item_count();

    let measured = controller.measured_content_size(
        sectional_core::Size::new(200.0, 600.0),
        &Content::new(|content| {
            content.add(Section::with("m", |section| {
                for id in 0..4 {
                    section.add_item(fixed_row(id, "row", 25.0));
                }
            }));
        }),
        None,
    );

    assert_eq!((measured.width, measured.height), (200.0, 100.0));
    assert_eq!(controller.presented_item_count(), presented);

    // An item limit caps how much is measured.
    let measured = controller.measured_content_size(
        sectional_core::Size::new(200.0, 600.0),
        &Content::new(|content| {
            content.add(Section::with("m", |section| {
                for id in 0..4 {
                    section.add_item(fixed_row(id, "row", 25.0));
                }
            }));
        }),
        Some(2),
    );
    assert_eq!(measured.height, 50.0);
}
