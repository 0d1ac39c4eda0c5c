use serde::{Deserialize, Serialize};

use thriftup_cart::CartLine;
use thriftup_core::{DomainError, DomainResult, Money};

use crate::buyer::BuyerInfo;
use crate::fee::FeePolicy;
use crate::link::WhatsAppLink;

/// One rendered order line, numbered from 1 in cart order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageLine {
    pub index: usize,
    pub name: String,
    pub size: Option<String>,
    pub quantity: u32,
    pub unit_price: Money,
}

impl core::fmt::Display for MessageLine {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(
            f,
            "{}. {} (Size: {}) x{} @ {}",
            self.index,
            self.name,
            self.size.as_deref().unwrap_or("-"),
            self.quantity,
            self.unit_price
        )
    }
}

/// Everything produced for a hand-off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutMessage {
    pub subtotal: Money,
    pub service_fee: Money,
    pub grand_total: Money,
    pub lines: Vec<MessageLine>,
    /// Plain message text, before encoding.
    pub text: String,
    /// Deep link carrying the encoded text.
    pub link: String,
}

/// Render the cart and buyer details into a message and deep link.
///
/// Fails with a validation error, and produces nothing, when any buyer field
/// is blank or the cart has no lines. Clearing the cart afterwards is the
/// caller's job.
pub fn compose_message(
    lines: &[CartLine],
    buyer: &BuyerInfo,
    fee: &FeePolicy,
    channel: &WhatsAppLink,
) -> DomainResult<CheckoutMessage> {
    buyer.validate()?;
    if lines.is_empty() {
        return Err(DomainError::validation("cart is empty"));
    }

    let subtotal: Money = lines.iter().map(CartLine::line_total).sum();
    let service_fee = fee.fee_for(subtotal);
    let grand_total = subtotal + service_fee;

    let rendered: Vec<MessageLine> = lines
        .iter()
        .enumerate()
        .map(|(i, line)| MessageLine {
            index: i + 1,
            name: line.product.name.clone(),
            size: line.product.size.clone(),
            quantity: line.quantity,
            unit_price: line.product.price,
        })
        .collect();

    let text = render_text(buyer, &rendered, subtotal, fee, service_fee, grand_total);
    let link = channel.url_for(&text);

    tracing::info!(
        lines = rendered.len(),
        subtotal = subtotal.amount(),
        grand_total = grand_total.amount(),
        destination = channel.destination(),
        "checkout message composed"
    );

    Ok(CheckoutMessage {
        subtotal,
        service_fee,
        grand_total,
        lines: rendered,
        text,
        link,
    })
}

fn render_text(
    buyer: &BuyerInfo,
    lines: &[MessageLine],
    subtotal: Money,
    fee: &FeePolicy,
    service_fee: Money,
    grand_total: Money,
) -> String {
    let mut out = vec![
        "Halo, saya mau pesan dari ThriftUp:".to_string(),
        String::new(),
        format!("Nama: {}", buyer.name.trim()),
        format!("No. HP: {}", buyer.phone.trim()),
        format!("Alamat: {}", buyer.address.trim()),
        String::new(),
        "Pesanan:".to_string(),
    ];
    out.extend(lines.iter().map(ToString::to_string));
    out.push(String::new());
    out.push(format!("Subtotal: {subtotal}"));
    if let Some(label) = fee.label() {
        out.push(format!("{label}: {service_fee}"));
    }
    out.push(format!("Total: {grand_total}"));
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use thriftup_core::ProductId;
    use thriftup_products::Product;

    fn line(id: &str, name: &str, price: u64, quantity: u32) -> CartLine {
        CartLine {
            product: Product::new(ProductId::new(id).unwrap(), name, Money::new(price)),
            quantity,
        }
    }

    fn buyer() -> BuyerInfo {
        BuyerInfo::new("Sari", "081234567890", "Jl. Merdeka 1, Bandung")
    }

    fn channel() -> WhatsAppLink {
        WhatsAppLink::with_default_base("6281234567890").unwrap()
    }

    fn sample_lines() -> Vec<CartLine> {
        let mut jaket = line("jaket", "Jaket", 150_000, 1);
        jaket.product.size = Some("L".into());
        vec![jaket, line("sepatu", "Sepatu", 200_000, 2)]
    }

    #[test]
    fn two_line_cart_with_ten_percent_fee() {
        let msg = compose_message(&sample_lines(), &buyer(), &FeePolicy::default(), &channel()).unwrap();

        assert_eq!(msg.subtotal, Money::new(550_000));
        assert_eq!(msg.service_fee, Money::new(55_000));
        assert_eq!(msg.grand_total, Money::new(605_000));
        assert!(msg.text.contains("Jaket"));
        assert!(msg.text.contains("Sepatu"));
        assert!(msg.text.contains("605.000"));
        assert!(msg.text.ends_with("Total: Rp 605.000"));
    }

    #[test]
    fn full_message_layout() {
        let msg = compose_message(&sample_lines(), &buyer(), &FeePolicy::default(), &channel()).unwrap();

        let expected = "Halo, saya mau pesan dari ThriftUp:\n\
            \n\
            Nama: Sari\n\
            No. HP: 081234567890\n\
            Alamat: Jl. Merdeka 1, Bandung\n\
            \n\
            Pesanan:\n\
            1. Jaket (Size: L) x1 @ Rp 150.000\n\
            2. Sepatu (Size: -) x2 @ Rp 200.000\n\
            \n\
            Subtotal: Rp 550.000\n\
            Biaya Layanan (10%): Rp 55.000\n\
            Total: Rp 605.000";
        assert_eq!(msg.text, expected);
    }

    #[test]
    fn lines_follow_cart_order() {
        let msg = compose_message(&sample_lines(), &buyer(), &FeePolicy::default(), &channel()).unwrap();
        assert_eq!(msg.lines.len(), 2);
        assert_eq!(msg.lines[0].index, 1);
        assert_eq!(msg.lines[0].name, "Jaket");
        assert_eq!(msg.lines[0].size.as_deref(), Some("L"));
        assert_eq!(msg.lines[1].index, 2);
        assert_eq!(msg.lines[1].quantity, 2);
        assert_eq!(msg.lines[1].unit_price, Money::new(200_000));
    }

    #[test]
    fn link_carries_encoded_text() {
        let msg = compose_message(&sample_lines(), &buyer(), &FeePolicy::default(), &channel()).unwrap();
        assert!(msg.link.starts_with("https://wa.me/6281234567890?text=Halo%2C%20saya"));
        assert!(msg.link.contains("Rp%20605.000"));
        assert!(!msg.link.contains('\n'));
        assert!(!msg.link.contains(' '));
    }

    #[test]
    fn no_fee_policy_omits_fee_line() {
        let msg = compose_message(&sample_lines(), &buyer(), &FeePolicy::None, &channel()).unwrap();
        assert_eq!(msg.service_fee, Money::ZERO);
        assert_eq!(msg.grand_total, Money::new(550_000));
        assert!(!msg.text.contains("Biaya Layanan"));
    }

    #[test]
    fn flat_fee_policy() {
        let fee = FeePolicy::Flat {
            amount: Money::new(5_000),
        };
        let msg = compose_message(&sample_lines(), &buyer(), &fee, &channel()).unwrap();
        assert_eq!(msg.grand_total, Money::new(555_000));
        assert!(msg.text.contains("Biaya Layanan: Rp 5.000"));
    }

    #[test]
    fn any_blank_buyer_field_fails_validation() {
        let cases = [
            BuyerInfo::new("", "0812", "Jl. A"),
            BuyerInfo::new("Sari", "", "Jl. A"),
            BuyerInfo::new("Sari", "0812", "   "),
        ];
        for buyer in cases {
            let err = compose_message(&sample_lines(), &buyer, &FeePolicy::default(), &channel())
                .unwrap_err();
            assert!(err.is_validation(), "expected validation error, got {err:?}");
        }
    }

    #[test]
    fn empty_cart_fails_validation() {
        let err = compose_message(&[], &buyer(), &FeePolicy::default(), &channel()).unwrap_err();
        assert_eq!(err, DomainError::validation("cart is empty"));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: grand total is always subtotal + fee, and the
            /// subtotal matches the line arithmetic.
            #[test]
            fn totals_are_consistent(
                items in prop::collection::vec((0u64..10_000_000, 1u32..20), 1..8),
                basis_points in 0u32..=10_000
            ) {
                let lines: Vec<CartLine> = items
                    .iter()
                    .enumerate()
                    .map(|(i, (price, qty))| line(&format!("p{i}"), &format!("Barang {i}"), *price, *qty))
                    .collect();
                let fee = FeePolicy::Rate { basis_points };

                let msg = compose_message(&lines, &buyer(), &fee, &channel()).unwrap();

                let expected: u64 = items.iter().map(|(p, q)| p * u64::from(*q)).sum();
                prop_assert_eq!(msg.subtotal.amount(), expected);
                prop_assert_eq!(msg.grand_total, msg.subtotal + msg.service_fee);
                prop_assert_eq!(msg.lines.len(), lines.len());
            }
        }
    }
}
