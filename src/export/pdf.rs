use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, ObjectId, Stream};

use super::layout::{PageGrid, Placement};
use super::raster::Raster;
use crate::error::Result;

const PT_PER_MM: f32 = 72.0 / 25.4;

/// Compose placed rasters into a PDF. Every raster is drawn at exactly its
/// placement size, whatever its pixel resolution.
pub fn compose_pdf(grid: &PageGrid, placed: &[(Placement, Raster)]) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let page_count = placed
        .iter()
        .map(|(placement, _)| placement.page + 1)
        .max()
        .unwrap_or(1);

    let mut kids: Vec<Object> = Vec::with_capacity(page_count);
    for page in 0..page_count {
        let mut operations = Vec::new();
        let mut xobjects = Dictionary::new();

        for (index, (placement, raster)) in placed
            .iter()
            .enumerate()
            .filter(|(_, (placement, _))| placement.page == page)
        {
            let image_id = doc.add_object(image_stream(raster));
            let name = format!("Im{index}");
            xobjects.set(name.clone(), image_id);
            operations.extend(draw_image(grid, placement, name));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => dictionary! { "XObject" => xobjects },
        });
        kids.push(page_id.into());
    }

    doc.objects.insert(pages_id, Object::Dictionary(pages_dict(grid, kids)));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)?;
    Ok(bytes)
}

fn pages_dict(grid: &PageGrid, kids: Vec<Object>) -> Dictionary {
    let count = kids.len() as i64;
    dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            (grid.page_width_mm * PT_PER_MM).into(),
            (grid.page_height_mm * PT_PER_MM).into(),
        ],
    }
}

fn image_stream(raster: &Raster) -> Stream {
    Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => raster.width as i64,
            "Height" => raster.height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8,
        },
        raster.rgb.clone(),
    )
}

/// PDF space starts bottom-left, placements start top-left.
fn draw_image(grid: &PageGrid, placement: &Placement, name: String) -> [Operation; 4] {
    let width = placement.width_mm * PT_PER_MM;
    let height = placement.height_mm * PT_PER_MM;
    let x = placement.x_mm * PT_PER_MM;
    let y = (grid.page_height_mm - placement.y_mm - placement.height_mm) * PT_PER_MM;
    [
        Operation::new("q", vec![]),
        Operation::new(
            "cm",
            vec![
                width.into(),
                Object::Integer(0),
                Object::Integer(0),
                height.into(),
                x.into(),
                y.into(),
            ],
        ),
        Operation::new("Do", vec![Object::Name(name.into_bytes())]),
        Operation::new("Q", vec![]),
    ]
}

/// Object ids of every page, in order. Handy for inspecting a composed
/// document.
pub fn page_ids(bytes: &[u8]) -> Result<Vec<ObjectId>> {
    let doc = Document::load_mem(bytes)?;
    Ok(doc.get_pages().into_values().collect())
}
