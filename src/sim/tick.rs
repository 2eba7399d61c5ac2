//! Per-frame update
//!
//! One frame steps every effect with the same scaled delta, in a fixed order:
//! shop, about, stockists, interviews. Hidden sections keep advancing.

use super::effect::{Effect, StepContext};
use super::state::Page;

/// Advance all effects by `raw_dt` seconds of wall time
pub fn tick(page: &mut Page, raw_dt: f32) {
    let dt = page.clock.tick(raw_dt);
    step_effects(page, dt);
}

/// Consume a frame timestamp (ms). Returns false if the clock is paused and
/// nothing advanced.
pub fn frame(page: &mut Page, timestamp_ms: f64) -> bool {
    match page.clock.advance(timestamp_ms) {
        Some(dt) => {
            step_effects(page, dt);
            true
        }
        None => false,
    }
}

fn step_effects(page: &mut Page, dt: f32) {
    let mut ctx = StepContext {
        dt,
        speed: page.clock.speed(),
        rng: &mut page.rng,
    };
    page.bouncer.step(&mut ctx);
    page.hue.step(&mut ctx);
    page.shuffler.step(&mut ctx);
    page.faller.step(&mut ctx);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::consts::*;
    use crate::sim::{Area, GridLayout, Section};
    use glam::Vec2;

    fn measure(section: Section) -> Area {
        match section {
            Section::Shop => Area::new(900.0, 500.0),
            Section::About => Area::new(900.0, 300.0),
            Section::Stockists => Area::new(1000.0, 400.0),
            Section::Interviews => Area::new(600.0, 400.0),
        }
    }

    fn page(seed: u64) -> Page {
        Page::new(&Settings::default(), seed, measure)
    }

    fn snapshot(page: &Page) -> (Vec<Vec2>, f32, Vec<Vec2>, Vec<Vec2>) {
        (
            page.bouncer.items.iter().map(|i| i.pos).collect(),
            page.hue.hue,
            page.shuffler.boxes.iter().map(|b| b.offset).collect(),
            page.faller.labels.iter().map(|l| l.pos).collect(),
        )
    }

    #[test]
    fn test_effects_built_from_settings() {
        let page = page(1);
        assert_eq!(page.bouncer.len(), 4);
        assert_eq!(page.shuffler.len(), 12);
        assert_eq!(page.faller.len(), 15);
        assert!(!page.hue.is_empty());
    }

    #[test]
    fn test_frame_advances_effects() {
        let mut page = page(1);
        assert!(frame(&mut page, 0.0));
        let before = snapshot(&page);
        assert!(frame(&mut page, 100.0));
        let after = snapshot(&page);
        assert_ne!(before.0, after.0);
        assert!((after.1 - 3.0).abs() < 1e-4);
        assert_ne!(before.3, after.3);
    }

    #[test]
    fn test_pause_resume_without_tick_does_not_advance() {
        let mut page = page(2);
        frame(&mut page, 0.0);
        frame(&mut page, 16.0);
        page.clock.pause();
        assert!(!frame(&mut page, 5000.0));
        let before = snapshot(&page);

        page.clock.resume();
        assert!(frame(&mut page, 9000.0));
        let after = snapshot(&page);
        assert_eq!(before.0, after.0);
        assert_eq!(before.1, after.1);
        assert_eq!(before.3, after.3);
    }

    #[test]
    fn test_hidden_sections_keep_advancing() {
        let mut page = page(3);
        assert_eq!(page.visibility.visible_sections().count(), 0);
        let before = snapshot(&page);
        tick(&mut page, 0.25);
        let after = snapshot(&page);
        assert_ne!(before.0, after.0);
        assert!(after.1 > before.1);
    }

    #[test]
    fn test_tick_scales_by_speed() {
        let mut page = page(4);
        page.clock.set_speed(2.0);
        tick(&mut page, 1.0);
        assert!((page.hue.hue - 60.0).abs() < 1e-4);
    }

    #[test]
    fn test_determinism() {
        let mut a = page(99999);
        let mut b = page(99999);
        for i in 0..120 {
            let ts = i as f64 * 16.0;
            frame(&mut a, ts);
            frame(&mut b, ts);
        }
        assert_eq!(snapshot(&a), snapshot(&b));
    }

    #[test]
    fn test_show_relayouts_only_with_current_ticket() {
        let mut page = page(5);
        let (visible, ticket) = page.toggle_section(Section::Stockists);
        assert!(visible);
        let ticket = ticket.expect("stockists relayout on show");
        assert!(page.redeem_relayout(ticket, Area::new(500.0, 700.0)));
        // 500px wide falls back to two columns
        assert_eq!(page.shuffler.boxes[1].home.y, page.shuffler.boxes[0].home.y);
        assert!(page.shuffler.boxes[2].home.y > page.shuffler.boxes[0].home.y);
        assert!(!page.redeem_relayout(ticket, Area::new(500.0, 700.0)));
    }

    /// Sections start hidden, so every container first measures 0x0
    fn collapsed_page(seed: u64) -> Page {
        Page::new(&Settings::default(), seed, |_| Area::new(0.0, 0.0))
    }

    fn show_and_relayout(page: &mut Page, section: Section, area: Area) {
        let (visible, ticket) = page.toggle_section(section);
        assert!(visible);
        let ticket = ticket.expect("relayout ticket on show");
        assert!(page.redeem_relayout(ticket, area));
    }

    #[test]
    fn test_shop_bounds_follow_show_after_collapsed_start() {
        let mut page = collapsed_page(21);
        assert_eq!(
            page.bouncer.area(),
            Area::new(SHOP_ITEM_WIDTH, SHOP_ITEM_HEIGHT)
        );
        let starts: Vec<Vec2> = page.bouncer.items.iter().map(|i| i.pos).collect();

        show_and_relayout(&mut page, Section::Shop, Area::new(900.0, 500.0));
        assert_eq!(page.bouncer.area(), Area::new(900.0, 500.0));
        // Bounds only: nothing is repositioned by the relayout itself
        let after: Vec<Vec2> = page.bouncer.items.iter().map(|i| i.pos).collect();
        assert_eq!(starts, after);

        for i in 0..60 {
            frame(&mut page, i as f64 * 16.0);
        }
        assert!(page.bouncer.items.iter().all(|i| i.pos != Vec2::ZERO));
        assert!(page.bouncer.items.iter().any(|i| i.pos.x > 1.0 || i.pos.y > 1.0));
        for item in &page.bouncer.items {
            assert!(item.pos.x <= 900.0 - item.size.x);
            assert!(item.pos.y <= 500.0 - item.size.y);
        }
    }

    #[test]
    fn test_stockists_grid_follows_show_after_collapsed_start() {
        let mut page = collapsed_page(22);
        // 0px wide is narrow: two columns
        assert_eq!(page.shuffler.boxes[1].home.y, page.shuffler.boxes[0].home.y);
        assert!(page.shuffler.boxes[2].home.y > page.shuffler.boxes[0].home.y);

        let area = Area::new(1000.0, 400.0);
        show_and_relayout(&mut page, Section::Stockists, area);
        let wide = GridLayout::compute(12, area);
        assert_eq!(wide.cols, 4);
        let homes: Vec<Vec2> = page.shuffler.boxes.iter().map(|b| b.home).collect();
        assert_eq!(homes, wide.slots);
        assert_eq!(page.shuffler.boxes[3].home.y, page.shuffler.boxes[0].home.y);
    }

    #[test]
    fn test_interviews_bounds_follow_show_after_collapsed_start() {
        let mut page = collapsed_page(23);
        assert_eq!(
            page.faller.area(),
            Area::new(FALL_MIN_WIDTH, FALL_MIN_HEIGHT)
        );
        show_and_relayout(&mut page, Section::Interviews, Area::new(800.0, 600.0));
        assert_eq!(page.faller.area(), Area::new(800.0, 600.0));
        assert!(page.faller.labels.iter().all(|l| l.pos.x <= 760.0));
    }

    #[test]
    fn test_about_show_needs_no_relayout() {
        let mut page = collapsed_page(24);
        let (visible, ticket) = page.toggle_section(Section::About);
        assert!(visible);
        assert!(ticket.is_none());
        tick(&mut page, 1.0);
        assert!((page.hue.hue - 30.0).abs() < 1e-4);
    }

    #[test]
    fn test_resize_only_touches_visible_sections() {
        let mut page = page(6);
        let stockists_before: Vec<Vec2> = page.shuffler.boxes.iter().map(|b| b.home).collect();
        page.toggle_section(Section::Interviews);
        page.resize(|_| Area::new(400.0, 300.0));
        let stockists_after: Vec<Vec2> = page.shuffler.boxes.iter().map(|b| b.home).collect();
        assert_eq!(stockists_before, stockists_after);
        assert_eq!(page.faller.area(), Area::new(400.0, 300.0));
    }
}
