//! HTML bodies for lifecycle notifications.

use voya_quote::Quote;
use voya_request::TravelRequest;
use voya_shared::models::events::QuoteRespondedEvent;

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", item))
        .collect::<Vec<_>>()
        .join("")
}

/// New request → agency inbox: the full preference breakdown.
pub fn request_submitted(request: &TravelRequest) -> String {
    let p = &request.preferences;

    format!(
        r#"
    <h1>New Travel Request</h1>
    <h2>Client: {user_name}</h2>
    <p><strong>Email:</strong> {user_email}</p>

    <h3>Trip Details:</h3>
    <ul>
      <li><strong>Dates:</strong> {start} - {end}</li>
      <li><strong>Flexible dates:</strong> {flexible}</li>
      <li><strong>Days available:</strong> {days}</li>
    </ul>

    <h3>Passengers:</h3>
    <ul>
      <li>Adults: {adults}</li>
      <li>Children: {children}</li>
      <li>Infants: {infants}</li>
    </ul>

    <h3>Destinations:</h3>
    <ul>{destinations}</ul>

    <h3>Accommodation:</h3>
    <ul>{accommodation}</ul>

    <h3>Activities of interest:</h3>
    <ul>{activities}</ul>

    <h3>Other preferences:</h3>
    <p>{other}</p>

    <hr>
    <p><strong>Request ID:</strong> {request_id}</p>
  "#,
        user_name = request.user_name,
        user_email = request.user_email,
        start = p.travel_period.start_date,
        end = p.travel_period.end_date,
        flexible = if p.travel_period.flexible { "Yes" } else { "No" },
        days = p.days_available,
        adults = p.passengers.adults,
        children = p.passengers.children,
        infants = p.passengers.infants,
        destinations = list_items(&p.destinations),
        accommodation = list_items(&p.accommodation_types),
        activities = list_items(&p.activities),
        other = if p.other_preferences.is_empty() {
            "None"
        } else {
            &p.other_preferences
        },
        request_id = request.id,
    )
}

/// New quote → client, with a deep link to the quote page.
pub fn quote_created(quote: &Quote, request: &TravelRequest, base_url: &str) -> String {
    format!(
        r#"
    <h1>Your Travel Quote Is Ready!</h1>
    <p>Hi {user_name},</p>
    <p>We have put together a tailored quote for your trip:</p>

    <h2>{title}</h2>
    <p>{description}</p>

    <h3>Itinerary:</h3>
    <pre style="white-space: pre-wrap; font-family: Arial, sans-serif;">{itinerary}</pre>

    <h3>Price:</h3>
    <p style="font-size: 24px; font-weight: bold; color: #2563eb;">
      {price:.2} {currency}
    </p>

    <p><strong>Valid until:</strong> {valid_until}</p>

    <p>
      <a href="{base_url}/dashboard/quotes/{quote_id}"
         style="display: inline-block; background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 8px; font-weight: bold;">
        View full quote
      </a>
    </p>

    <p>Interested? Sign in to your account to accept or reject this quote.</p>

    <hr>
    <p style="font-size: 12px; color: #666;">
      Voya - Your personal travel agency
    </p>
  "#,
        user_name = request.user_name,
        title = quote.title,
        description = quote.description,
        itinerary = quote.itinerary,
        price = quote.price,
        currency = quote.currency,
        valid_until = quote.valid_until.format("%B %e, %Y"),
        base_url = base_url,
        quote_id = quote.id,
    )
}

/// Acceptance confirmation → client.
pub fn quote_accepted(quote: &Quote, event: &QuoteRespondedEvent) -> String {
    format!(
        r#"
    <h1>Quote Confirmed</h1>
    <p>Hi {user_name},</p>
    <p>You have accepted the following quote. Our team will reach out shortly
    to arrange payment and final bookings.</p>

    <h2>{title}</h2>
    <p><strong>Price:</strong> {price:.2} {currency}</p>

    <p><strong>Quote ID:</strong> {quote_id}</p>

    <hr>
    <p style="font-size: 12px; color: #666;">
      Voya - Your personal travel agency
    </p>
  "#,
        user_name = event.user_name,
        title = quote.title,
        price = quote.price,
        currency = quote.currency,
        quote_id = quote.id,
    )
}

/// Rejection notice → agency.
pub fn quote_rejected(quote: &Quote, event: &QuoteRespondedEvent) -> String {
    format!(
        r#"
    <h1>Quote Rejected</h1>
    <p>Client {user_name} ({user_email}) has rejected the following quote:</p>

    <h2>{title}</h2>
    <p><strong>Price:</strong> {price:.2} {currency}</p>

    <p><strong>Quote ID:</strong> {quote_id}</p>
    <p><strong>Request ID:</strong> {request_id}</p>

    <hr>
    <p>You can contact the client to understand their needs or prepare a new proposal.</p>
  "#,
        user_name = event.user_name,
        user_email = event.user_email.0,
        title = quote.title,
        price = quote.price,
        currency = quote.currency,
        quote_id = quote.id,
        request_id = quote.request_id,
    )
}
