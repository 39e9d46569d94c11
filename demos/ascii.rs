use std::io::{self, Read};

fn main() {
    let mut buffer = vec![];
    io::stdin().read_to_end(&mut buffer).unwrap();

    let code = crypax_qr::QrCode::encode(&buffer).unwrap();
    print!("{}", code.bitmap().unicode());
}
