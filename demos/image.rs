use crypax_qr::placement::QUIET_ZONE;
use image::{GrayImage, Luma};

/// Generate an image which only contains a QR code
fn main() {
    // Define width and height in pixels of one black square in the image.
    const N: usize = 8;

    let uri = crypax_qr::uri::eip681_uri(
        "0x71C7656EC7ab88b098defB751B7401B5f6d8976F",
        crypax_qr::uri::to_wei("0.5").unwrap(),
        1,
    );
    let code = crypax_qr::QrCode::encode_str(&uri).unwrap();
    let bitmap = code.bitmap();

    // The quiet zone around the symbol is required by readers
    let width = ((bitmap.width() + 2 * QUIET_ZONE) * N) as u32;
    let height = ((bitmap.height() + 2 * QUIET_ZONE) * N) as u32;
    let mut image = GrayImage::from_pixel(width, height, Luma([255]));
    for (x, y) in bitmap.pixels() {
        // Write the black square at x, y using NxN black pixels
        for i in 0..N {
            for j in 0..N {
                let x_i = (x + QUIET_ZONE) * N + j;
                let y_j = (y + QUIET_ZONE) * N + i;
                image.put_pixel(x_i as u32, y_j as u32, Luma([0]));
            }
        }
    }

    image.save("qr_code.png").unwrap();
}
