use nalgebra_glm as glm;

use crate::error::{FolioError, FolioResult};
use crate::gltf::{AccessorReader, Document, GlbFile, TargetPath};

/// Largest dimension every loaded model is scaled to, so all models
/// appear consistently sized regardless of source scale.
pub const NORMALIZED_MAX_DIMENSION: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: glm::Vec3,
    pub max: glm::Vec3,
}

impl Aabb {
    pub fn empty() -> Self {
        Self {
            min: glm::vec3(f32::INFINITY, f32::INFINITY, f32::INFINITY),
            max: glm::vec3(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
        }
    }

    pub fn grow(&mut self, p: glm::Vec3) {
        self.min = glm::min2(&self.min, &p);
        self.max = glm::max2(&self.max, &p);
    }

    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    pub fn center(&self) -> glm::Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> glm::Vec3 {
        self.max - self.min
    }

    pub fn max_dimension(&self) -> f32 {
        let s = self.size();
        s.x.max(s.y).max(s.z)
    }
}

pub struct SceneNode {
    pub parent: Option<usize>,
    pub translation: glm::Vec3,
    pub rotation: glm::Quat,
    pub scale: glm::Vec3,
    /// Fixed local matrix for nodes authored with `matrix` instead of TRS.
    pub local_matrix: Option<glm::Mat4>,
    pub global: glm::Mat4,
}

impl SceneNode {
    pub fn local(&self) -> glm::Mat4 {
        if let Some(m) = self.local_matrix {
            return m;
        }
        let t = glm::translation(&self.translation);
        let r = glm::quat_to_mat4(&self.rotation);
        let s = glm::scaling(&self.scale);
        t * r * s
    }
}

pub struct SceneMesh {
    pub node: usize,
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub indices: Vec<u32>,
    pub base_color: [f32; 4],
    pub texture: Option<usize>,
}

pub struct SceneTexture {
    pub rgba: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

pub enum ChannelValues {
    Vec3(Vec<[f32; 3]>),
    Quat(Vec<[f32; 4]>),
}

pub struct Channel {
    pub node: usize,
    pub path: TargetPath,
    pub times: Vec<f32>,
    pub values: ChannelValues,
}

pub struct Clip {
    pub name: String,
    pub duration: f32,
    pub channels: Vec<Channel>,
}

/// A loaded model: a node forest, flattened triangle meshes in node-local
/// space, decoded textures, and the named animation clips.
pub struct Scene {
    pub nodes: Vec<SceneNode>,
    pub roots: Vec<usize>,
    pub meshes: Vec<SceneMesh>,
    pub textures: Vec<SceneTexture>,
    pub clips: Vec<Clip>,
    /// Normalization transform applied above the node forest.
    pub root_transform: glm::Mat4,
    /// Bounds of the un-normalized model, in world space.
    pub bounds: Aabb,
}

impl Scene {
    pub fn from_glb_bytes(data: &[u8]) -> FolioResult<Self> {
        let glb = GlbFile::parse(data)?;
        let doc = Document::from_json(&glb.json)?;
        let bin = glb.bin.unwrap_or_default();
        let mut scene = Self::from_document(&doc, &bin)?;
        scene.normalize(NORMALIZED_MAX_DIMENSION);
        Ok(scene)
    }

    pub fn from_document(doc: &Document, bin: &[u8]) -> FolioResult<Self> {
        if doc.buffers.iter().any(|b| b.uri.is_some()) {
            return Err(FolioError::model("external buffers are not supported"));
        }
        if let Some(buffer) = doc.buffers.first()
            && buffer.byte_length > bin.len() + 3
        {
            return Err(FolioError::model(format!(
                "binary chunk is {} bytes but the buffer declares {}",
                bin.len(),
                buffer.byte_length
            )));
        }
        let reader = AccessorReader::new(doc, bin);

        let mut nodes: Vec<SceneNode> = doc
            .nodes
            .iter()
            .map(|n| SceneNode {
                parent: None,
                translation: n.translation.map_or_else(glm::Vec3::zeros, glm::Vec3::from),
                rotation: n.rotation.map_or_else(glm::Quat::identity, |q| {
                    glm::quat(q[0], q[1], q[2], q[3])
                }),
                scale: n
                    .scale
                    .map_or_else(|| glm::vec3(1.0, 1.0, 1.0), glm::Vec3::from),
                local_matrix: n.matrix.map(|m| glm::Mat4::from_column_slice(&m)),
                global: glm::Mat4::identity(),
            })
            .collect();

        for (index, node) in doc.nodes.iter().enumerate() {
            for &child in &node.children {
                if child >= nodes.len() {
                    return Err(FolioError::model(format!("node child {child} out of range")));
                }
                nodes[child].parent = Some(index);
            }
        }
        let roots: Vec<usize> = if doc.root_nodes().is_empty() {
            (0..nodes.len()).filter(|i| nodes[*i].parent.is_none()).collect()
        } else {
            // A root referencing a missing node would panic the transform
            // walk; drop it instead.
            doc.root_nodes()
                .iter()
                .copied()
                .filter(|&r| r < nodes.len())
                .collect()
        };

        for node in doc.nodes.iter().filter(|n| n.skin.is_some()) {
            log::warn!(
                "node '{}' is skinned; skins are ignored and drawn in bind pose",
                node.name.as_deref().unwrap_or("<unnamed>")
            );
        }

        // Decode only the images actually referenced by base-color slots.
        let mut image_slots: Vec<Option<usize>> = vec![None; doc.images.len()];
        let mut textures = Vec::new();
        let mut resolve_image = |image_index: usize,
                                 textures: &mut Vec<SceneTexture>|
         -> FolioResult<usize> {
            if let Some(slot) = image_slots.get(image_index).copied().flatten() {
                return Ok(slot);
            }
            let image = doc
                .images
                .get(image_index)
                .ok_or_else(|| FolioError::model(format!("image {image_index} out of range")))?;
            let view = image
                .buffer_view
                .ok_or_else(|| FolioError::model("external image uris are not supported"))?;
            let decoded = image::load_from_memory(reader.view_bytes(view)?)?.to_rgba8();
            let (width, height) = decoded.dimensions();
            textures.push(SceneTexture {
                rgba: decoded.into_raw(),
                width,
                height,
            });
            image_slots[image_index] = Some(textures.len() - 1);
            Ok(textures.len() - 1)
        };

        let mut meshes = Vec::new();
        for (node_index, node) in doc.nodes.iter().enumerate() {
            let Some(mesh_index) = node.mesh else {
                continue;
            };
            let mesh = doc
                .meshes
                .get(mesh_index)
                .ok_or_else(|| FolioError::model(format!("mesh {mesh_index} out of range")))?;
            for primitive in &mesh.primitives {
                // Triangles only; points/lines contribute nothing visible here.
                if primitive.mode.unwrap_or(4) != 4 {
                    continue;
                }
                let positions = match primitive.attributes.get("POSITION") {
                    Some(&acc) => reader.read_vec3(acc)?,
                    None => continue,
                };
                let mut normals = match primitive.attributes.get("NORMAL") {
                    Some(&acc) => reader.read_vec3(acc)?,
                    None => Vec::new(),
                };
                let mut uvs = match primitive.attributes.get("TEXCOORD_0") {
                    Some(&acc) => reader.read_vec2(acc)?,
                    None => Vec::new(),
                };
                // Attribute accessors must agree on length; pad rather
                // than let a short one truncate the zip at bake time.
                normals.resize(positions.len(), [0.0, 1.0, 0.0]);
                uvs.resize(positions.len(), [0.0, 0.0]);
                let indices = match primitive.indices {
                    Some(acc) => reader.read_indices(acc)?,
                    None => (0..positions.len() as u32).collect(),
                };
                if indices.iter().any(|&i| i as usize >= positions.len()) {
                    return Err(FolioError::model("primitive index out of range"));
                }

                let mut base_color = [1.0, 1.0, 1.0, 1.0];
                let mut texture = None;
                if let Some(material) = primitive.material.and_then(|m| doc.materials.get(m)) {
                    base_color = material.pbr_metallic_roughness.base_color_factor;
                    if let Some(tex_ref) = &material.pbr_metallic_roughness.base_color_texture {
                        if let Some(image_index) =
                            doc.textures.get(tex_ref.index).and_then(|t| t.source)
                        {
                            texture = Some(resolve_image(image_index, &mut textures)?);
                        }
                    }
                }

                meshes.push(SceneMesh {
                    node: node_index,
                    positions,
                    normals,
                    uvs,
                    indices,
                    base_color,
                    texture,
                });
            }
        }

        let clips = Self::build_clips(doc, &reader, nodes.len())?;

        let mut scene = Self {
            nodes,
            roots,
            meshes,
            textures,
            clips,
            root_transform: glm::Mat4::identity(),
            bounds: Aabb::empty(),
        };
        scene.compute_global_transforms();
        Ok(scene)
    }

    fn build_clips(
        doc: &Document,
        reader: &AccessorReader<'_>,
        node_count: usize,
    ) -> FolioResult<Vec<Clip>> {
        let mut clips = Vec::new();
        for (i, animation) in doc.animations.iter().enumerate() {
            let mut channels = Vec::new();
            let mut duration: f32 = 0.0;
            for channel in &animation.channels {
                let Some(node) = channel.target.node else {
                    continue;
                };
                if node >= node_count {
                    return Err(FolioError::model(format!(
                        "animation targets node {node} out of range"
                    )));
                }
                let sampler = animation.samplers.get(channel.sampler).ok_or_else(|| {
                    FolioError::model(format!("animation sampler {} out of range", channel.sampler))
                })?;
                if let Some(mode) = sampler.interpolation.as_deref()
                    && mode.eq_ignore_ascii_case("cubicspline")
                {
                    log::debug!("cubic spline channels are sampled linearly");
                }
                let times = reader.read_scalar_f32(sampler.input)?;
                let values = match channel.target.path {
                    TargetPath::Translation | TargetPath::Scale => {
                        ChannelValues::Vec3(reader.read_vec3(sampler.output)?)
                    }
                    TargetPath::Rotation => ChannelValues::Quat(reader.read_vec4(sampler.output)?),
                    TargetPath::Weights => continue,
                };
                if let Some(last) = times.last() {
                    duration = duration.max(*last);
                }
                channels.push(Channel {
                    node,
                    path: channel.target.path,
                    times,
                    values,
                });
            }
            clips.push(Clip {
                name: animation
                    .name
                    .clone()
                    .unwrap_or_else(|| format!("clip{i}")),
                duration,
                channels,
            });
        }
        Ok(clips)
    }

    pub fn compute_global_transforms(&mut self) {
        // Depth is capped at the node count so a malformed cyclic graph
        // terminates instead of recursing forever.
        fn visit(nodes: &mut Vec<SceneNode>, index: usize, parent: glm::Mat4, depth: usize) {
            if depth > nodes.len() {
                return;
            }
            let global = parent * nodes[index].local();
            nodes[index].global = global;
            let children: Vec<usize> = (0..nodes.len())
                .filter(|i| nodes[*i].parent == Some(index))
                .collect();
            for child in children {
                visit(nodes, child, global, depth + 1);
            }
        }
        let roots = self.roots.clone();
        for root in roots {
            visit(&mut self.nodes, root, glm::Mat4::identity(), 0);
        }
    }

    /// World matrix for a mesh: normalization above the node transform.
    pub fn world_matrix(&self, mesh: &SceneMesh) -> glm::Mat4 {
        self.root_transform * self.nodes[mesh.node].global
    }

    fn world_bounds(&self) -> Aabb {
        let mut bounds = Aabb::empty();
        for mesh in &self.meshes {
            let world = self.nodes[mesh.node].global;
            for p in &mesh.positions {
                let v = world * glm::vec4(p[0], p[1], p[2], 1.0);
                bounds.grow(v.xyz());
            }
        }
        bounds
    }

    /// Recenter the model about the origin and scale its largest dimension
    /// to `max_dimension`. One-shot, applied after load.
    pub fn normalize(&mut self, max_dimension: f32) {
        self.bounds = self.world_bounds();
        if !self.bounds.is_valid() {
            return;
        }
        let dim = self.bounds.max_dimension();
        let scale = if dim > 0.0 { max_dimension / dim } else { 1.0 };
        self.root_transform =
            glm::scaling(&glm::vec3(scale, scale, scale)) * glm::translation(&-self.bounds.center());
    }

    pub fn clip_index(&self, name: &str) -> Option<usize> {
        self.clips.iter().position(|c| c.name == name)
    }
}
