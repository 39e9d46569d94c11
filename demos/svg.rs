use crypax_qr::uri::{to_wei, PaymentUri};
use crypax_qr::SvgStyle;

fn main() {
    // amount and chain can be given on the command line
    let mut args = std::env::args().skip(1);
    let amount = args.next().unwrap_or_else(|| "0.01".to_owned());
    let chain_id = args.next().and_then(|c| c.parse().ok()).unwrap_or(1);

    let uri = PaymentUri {
        address: "0x71C7656EC7ab88b098defB751B7401B5f6d8976F".to_owned(),
        amount_wei: to_wei(&amount).unwrap(),
        chain_id,
    };
    let style = SvgStyle::default().with_foreground("#1f2937");
    println!("{}", crypax_qr::encode_with_style(&uri.to_string(), 240, &style));
}
