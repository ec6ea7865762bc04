use clap::Parser;
use meshmask::{
    mem::{MemMesh, Position},
    DataMask, MaskController,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Enable attribute channels on a small demo mesh and show how the declared
/// mask tracks the underlying buffers.
#[derive(Debug, Parser)]
struct Cli {
    /// Enable per-vertex color
    #[arg(long)]
    vert_color: bool,
    /// Enable per-vertex quality
    #[arg(long)]
    vert_quality: bool,
    /// Enable per-face wedge texture coordinates
    #[arg(long)]
    wedge: bool,
    /// Enable vertex-face adjacency (triggers a full topology rebuild)
    #[arg(long)]
    vf_topo: bool,
    /// Enable face-face adjacency (triggers a full topology rebuild)
    #[arg(long)]
    ff_topo: bool,
    /// Disable everything optional again before exiting
    #[arg(long)]
    teardown: bool,
}

/// Two triangles sharing an edge.
fn quad() -> MemMesh {
    let mut mesh = MemMesh::new();
    let v: Vec<u32> = [
        Position::new(0.0, 0.0, 0.0),
        Position::new(1.0, 0.0, 0.0),
        Position::new(1.0, 1.0, 0.0),
        Position::new(0.0, 1.0, 0.0),
    ]
    .into_iter()
    .map(|p| mesh.push_vertex(p))
    .collect();
    mesh.push_face([v[0], v[1], v[2]]).unwrap();
    mesh.push_face([v[0], v[2], v[3]]).unwrap();
    mesh.update_normals();
    mesh
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
    let cli = Cli::parse();

    let mut requested = DataMask::empty();
    if cli.vert_color {
        requested |= DataMask::VERT_COLOR;
    }
    if cli.vert_quality {
        requested |= DataMask::VERT_QUALITY;
    }
    if cli.wedge {
        requested |= DataMask::WEDGE_TEXCOORD;
    }
    if cli.vf_topo {
        requested |= DataMask::VERT_FACE_TOPO;
    }
    if cli.ff_topo {
        requested |= DataMask::FACE_FACE_TOPO;
    }

    let mut mesh = quad();
    let mut mask = MaskController::new();
    info!(baseline = ?mask.current(), "fresh controller");

    mask.enable(&mut mesh, requested)
        .expect("MemMesh supports every channel");
    println!("declared mask: {:?}", mask.current());
    println!("per-vertex color:  {}", mask.has_per_vertex_color());
    println!("per-vertex quality: {}", mask.has_per_vertex_quality());
    println!(
        "wedge tex coords:  {}",
        mask.has_per_face_wedge_tex_coords()
    );

    if cli.vf_topo {
        for v in 0..mesh.vertex_count() as u32 {
            let faces: Vec<u32> = mesh.faces_of_vertex(v).collect();
            println!("vertex {v} touches faces {faces:?}");
        }
    }
    if cli.ff_topo {
        for f in 0..mesh.face_count() as u32 {
            println!("face {f} neighbors: {:?}", mesh.ff_neighbors(f).unwrap());
        }
    }

    if cli.teardown {
        mask.disable(&mut mesh, DataMask::OPTIONAL);
        println!("after teardown: {:?}", mask.current());
    }
}
