//! Plain-text rendering of store contents.

use card_catalog::{CardRecord, Notification, PriceSnapshot};

pub fn print_cards(cards: &[CardRecord]) {
    if cards.is_empty() {
        println!("No cards.");
        return;
    }

    println!("{:>6}  {:<16}  {:<24}  Image", "ID", "Key", "Name");
    for card in cards {
        println!(
            "{:>6}  {:<16}  {:<24}  {}",
            card.id, card.unique_key, card.display_name, card.image_ref
        );
    }
    println!("{} card(s)", cards.len());
}

pub fn print_prices(card: &CardRecord, snapshot: &PriceSnapshot) {
    if card.display_name.is_empty() {
        println!("Prices for {} (updated {})", card.unique_key, snapshot.retrieved_at);
    } else {
        println!(
            "Prices for {} [{}] (updated {})",
            card.display_name, card.unique_key, snapshot.retrieved_at
        );
    }
    if snapshot.quotes.is_empty() {
        println!("  no quotes available");
        return;
    }
    println!(
        "  {:<24}  {:>9}  {:>9}  {:>9}  {:>9}",
        "Vendor", "Market", "Low", "Mid", "High"
    );
    for (vendor, quote) in &snapshot.quotes {
        println!(
            "  {:<24}  {:>9.2}  {:>9.2}  {:>9.2}  {:>9.2}",
            vendor, quote.market, quote.low, quote.mid, quote.high
        );
    }
}

pub fn print_notifications(notifications: &[Notification]) {
    for notification in notifications {
        eprintln!("[{}] {}", notification.level.label(), notification.message);
    }
}
