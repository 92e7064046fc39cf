//! HTML bodies for the transactional emails. Markup mirrors the
//! storefront's amber branding.

use crate::entities::{Order, User};

pub fn invoice_html(order: &Order, user: &User) -> String {
    let rows: String = order
        .order_items
        .iter()
        .map(|item| {
            format!(
                "<tr>\
                 <td style=\"padding: 8px; border-bottom: 1px solid #e5e7eb;\">{}</td>\
                 <td style=\"padding: 8px; border-bottom: 1px solid #e5e7eb; text-align: center;\">{}</td>\
                 <td style=\"padding: 8px; border-bottom: 1px solid #e5e7eb; text-align: right;\">&#8377;{:.2}</td>\
                 </tr>",
                item.title, item.qty, item.price
            )
        })
        .collect();

    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h1 style="color: #d97706;">Thank you for your order!</h1>
    <p>Hi {name},</p>
    <p>Your order <strong>#{id}</strong> has been placed successfully.</p>
    <table style="width: 100%; border-collapse: collapse; margin: 20px 0;">
        <thead>
            <tr style="background-color: #f3f4f6;">
                <th style="padding: 8px; text-align: left;">Item</th>
                <th style="padding: 8px; text-align: center;">Qty</th>
                <th style="padding: 8px; text-align: right;">Price</th>
            </tr>
        </thead>
        <tbody>{rows}</tbody>
    </table>
    <p style="text-align: right;">Shipping: &#8377;{shipping:.2}</p>
    <p style="text-align: right; font-size: 18px;"><strong>Total: &#8377;{total:.2}</strong></p>
    <p>We will let you know as soon as your books ship.</p>
    <p>Happy Reading,<br/>The BookHaven Team</p>
</div>"#,
        name = user.name,
        id = order.id,
        rows = rows,
        shipping = order.shipping_price,
        total = order.total_price,
    )
}

pub fn welcome_html() -> String {
    r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h1 style="color: #d97706;">Welcome to BookHaven!</h1>
    <p>Hi there,</p>
    <p>Thank you for subscribing to our newsletter. You're now part of a community of book lovers!</p>
    <div style="background-color: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0;">
        <p style="margin: 0; font-weight: bold;">Here is your welcome gift:</p>
        <h2 style="margin: 10px 0; color: #d97706;">10% OFF</h2>
        <p style="margin: 0;">Use code <strong>WELCOME10</strong> at checkout on your first order.</p>
    </div>
    <p>Stay tuned for updates on new arrivals, bestsellers, and exclusive offers.</p>
    <p>Happy Reading,<br/>The BookHaven Team</p>
</div>"#
        .to_string()
}

pub fn reset_html(token: &str) -> String {
    format!(
        r#"<div style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto;">
    <h1 style="color: #d97706;">Reset your password</h1>
    <p>Hi there,</p>
    <p>We received a request to reset your BookHaven password. Use the token below to choose a new one:</p>
    <div style="background-color: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0; text-align: center;">
        <code style="font-size: 16px;">{token}</code>
    </div>
    <p>This token is valid for 10 minutes. If you did not request a reset, you can safely ignore this email.</p>
    <p>Happy Reading,<br/>The BookHaven Team</p>
</div>"#
    )
}
