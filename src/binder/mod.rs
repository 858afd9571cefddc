//! Binds the current protein to a viewer and keeps the drawn layers in
//! step with the view toggles.
//!
//! Binding always starts from a fresh viewer. The backbone is drawn as the
//! `protein` layer; contacts and the membrane are custom meshes drawn only
//! while their toggle is on. Contact endpoints and membrane points are
//! resolved once at bind time, so a layer switched on later can still be
//! drawn without the protein at hand.

pub mod contacts;

use glam::{DVec3, Vec3};

pub use contacts::{ContactGraph, ContactLink, ContactNode};

use crate::error::PmwError;
use crate::model::Protein;
use crate::options::{Config, DesignOptions, ViewOptions, ViewerOptions};
use crate::pdb::Structure;
use crate::secondary_structure::assign_helix_sheet;
use crate::viewer::{RenderMode, Sphere, Tube, Viewer, ViewerFactory};

/// Layer holding the backbone.
pub const PROTEIN_LAYER: &str = "protein";
/// Mesh holding contact tubes.
pub const CONTACT_LAYER: &str = "contact";
/// Mesh holding membrane spheres.
pub const MEMBRANE_LAYER: &str = "membrane";

/// A change of one view toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEvent {
    /// Redraw the backbone with another mode.
    SetRenderMode(RenderMode),
    /// Show or hide the membrane.
    ShowMembrane(bool),
    /// Show or hide the contacts.
    ShowContacts(bool),
    /// Show or hide the raw PDB text.
    ShowPdb(bool),
}

/// Whether a viewer currently shows a protein.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinderState {
    /// Nothing bound.
    Empty,
    /// A viewer shows the bound protein.
    Loaded,
}

struct Bound<V> {
    viewer: V,
    structure: Structure,
    contacts: Vec<(Vec3, Vec3)>,
    membrane: Vec<Vec3>,
}

impl<V: Viewer> Bound<V> {
    fn draw_protein(&mut self, mode: RenderMode, design: &DesignOptions) {
        log::debug!("requested to draw using {}", mode.as_str());
        self.viewer.render_as(
            PROTEIN_LAYER,
            &self.structure,
            mode,
            design.backbone_rgba(),
        );
    }

    fn draw_contacts(&mut self, design: &DesignOptions) {
        log::debug!("drawing {} contacts", self.contacts.len());
        let color = design.contact_rgba();
        for &(start, end) in &self.contacts {
            self.viewer.add_tube(
                CONTACT_LAYER,
                Tube {
                    start,
                    end,
                    radius: design.contact_radius,
                    cap: false,
                    color,
                },
            );
        }
    }

    fn draw_membrane(&mut self, design: &DesignOptions) {
        log::debug!("drawing {} membrane points", self.membrane.len());
        for &center in &self.membrane {
            self.viewer.add_sphere(
                MEMBRANE_LAYER,
                Sphere {
                    center,
                    radius: design.membrane_radius,
                    color: design.membrane_color,
                },
            );
        }
    }

    fn draw(&mut self, layer: &str, design: &DesignOptions) {
        match layer {
            CONTACT_LAYER => self.draw_contacts(design),
            MEMBRANE_LAYER => self.draw_membrane(design),
            _ => {}
        }
    }

    fn toggle(&mut self, layer: &str, visible: bool, design: &DesignOptions) {
        if !visible {
            self.viewer.hide(layer);
        } else if self.viewer.contains(layer) {
            self.viewer.show(layer);
        } else {
            self.draw(layer, design);
        }
        self.viewer.request_redraw();
    }
}

/// Owns the viewer of the project view.
pub struct VisualizationBinder<F: ViewerFactory> {
    factory: F,
    viewer_options: ViewerOptions,
    design: DesignOptions,
    options: ViewOptions,
    bound: Option<Bound<F::Viewer>>,
}

impl<F: ViewerFactory> VisualizationBinder<F> {
    /// Create an unbound binder with the configured options.
    pub fn new(factory: F, config: &Config) -> Self {
        Self {
            factory,
            viewer_options: config.viewer.clone(),
            design: config.design.clone(),
            options: config.view,
            bound: None,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> BinderState {
        if self.bound.is_some() {
            BinderState::Loaded
        } else {
            BinderState::Empty
        }
    }

    /// Whether a protein is bound.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.bound.is_some()
    }

    /// Live view toggles.
    #[must_use]
    pub fn options(&self) -> ViewOptions {
        self.options
    }

    /// The viewer of the bound protein.
    #[must_use]
    pub fn viewer(&self) -> Option<&F::Viewer> {
        self.bound.as_ref().map(|b| &b.viewer)
    }

    /// The parsed structure of the bound protein.
    #[must_use]
    pub fn structure(&self) -> Option<&Structure> {
        self.bound.as_ref().map(|b| &b.structure)
    }

    /// The viewer factory.
    #[must_use]
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Drop the viewer.
    pub fn clear(&mut self) {
        self.bound = None;
    }

    /// Show `protein` in a fresh viewer.
    ///
    /// A protein without PDB text leaves the binder empty. On a parse
    /// error the binder is empty as well.
    pub fn bind(&mut self, protein: &Protein) -> Result<(), PmwError> {
        self.bound = None;
        if !protein.has_coordinates() {
            log::info!("'{}' has no coordinates; nothing to show", protein.name);
            return Ok(());
        }

        let mut viewer = self.factory.create(&self.viewer_options);
        viewer.set_fog(self.viewer_options.fog);
        let mut structure = Structure::parse(&protein.pdb_representation)?;
        assign_helix_sheet(&mut structure);

        let contacts = contact_endpoints(protein, &structure);
        let membrane = protein
            .membrane
            .as_ref()
            .map(|m| {
                m.membrane_molecules
                    .iter()
                    .map(|&p| DVec3::from_array(p).as_vec3())
                    .collect()
            })
            .unwrap_or_default();

        let mut bound = Bound {
            viewer,
            structure,
            contacts,
            membrane,
        };
        bound.draw_protein(self.options.render_mode, &self.design);
        if self.options.render_contacts && !protein.contacts.is_empty() {
            bound.draw_contacts(&self.design);
        }
        if self.options.render_membrane && protein.membrane.is_some() {
            bound.draw_membrane(&self.design);
        }
        bound.viewer.center_on(&bound.structure);
        bound.viewer.auto_zoom();

        log::info!(
            "bound '{}': {} atoms, {} contacts, {} membrane points",
            protein.name,
            bound.structure.atom_count(),
            bound.contacts.len(),
            bound.membrane.len()
        );
        self.bound = Some(bound);
        Ok(())
    }

    /// Apply a toggle change. Unchanged values are ignored.
    pub fn handle(&mut self, event: ViewEvent) {
        log::debug!("view event {event:?}");
        let design = &self.design;
        match event {
            ViewEvent::SetRenderMode(mode) => {
                if self.options.render_mode == mode {
                    return;
                }
                self.options.render_mode = mode;
                if let Some(bound) = &mut self.bound {
                    bound.viewer.remove(PROTEIN_LAYER);
                    bound.draw_protein(mode, design);
                }
            }
            ViewEvent::ShowMembrane(on) => {
                if self.options.render_membrane == on {
                    return;
                }
                self.options.render_membrane = on;
                if let Some(bound) = &mut self.bound {
                    bound.toggle(MEMBRANE_LAYER, on, design);
                }
            }
            ViewEvent::ShowContacts(on) => {
                if self.options.render_contacts == on {
                    return;
                }
                self.options.render_contacts = on;
                if let Some(bound) = &mut self.bound {
                    bound.toggle(CONTACT_LAYER, on, design);
                }
            }
            ViewEvent::ShowPdb(on) => self.options.render_pdb = on,
        }
    }
}

/// Cα pairs of every direct contact of `protein` found in `structure`.
fn contact_endpoints(protein: &Protein, structure: &Structure) -> Vec<(Vec3, Vec3)> {
    if protein.contacts.is_empty() {
        return Vec::new();
    }
    let graph = ContactGraph::build(protein);
    graph
        .direct_links()
        .filter_map(|link| {
            let source = &graph.nodes[link.source];
            let target = &graph.nodes[link.target];
            match (
                structure.atom(&source.ca_name()),
                structure.atom(&target.ca_name()),
            ) {
                (Some(a), Some(b)) => Some((a.position, b.position)),
                _ => {
                    log::warn!(
                        "no CA for contact {} - {}",
                        source.name,
                        target.name
                    );
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Atom, Chain, Interaction, Membrane, Residue};
    use crate::pdb::{atom_line, compose};
    use crate::viewer::{SceneFactory, SceneViewer};

    fn residue(id: i32, number: i32, x: f32) -> Residue {
        Residue {
            amino_acid: "ALA".to_owned(),
            residue_number: number,
            residue_id: id,
            atoms: vec![Atom {
                pdb_representation: atom_line(
                    id + 1,
                    "CA",
                    "ALA",
                    'A',
                    number,
                    [x, 0.0, 0.0],
                ),
                name: "CA".to_owned(),
                ..Atom::default()
            }],
            ..Residue::default()
        }
    }

    /// Five residues 3.8 Å apart on a line, contacts between ids 0-3 and
    /// the sequence neighbours 1-2.
    fn protein() -> Protein {
        let mut protein = Protein {
            name: "test".to_owned(),
            chains: vec![Chain {
                chain_id: "A".to_owned(),
                residues: (0..5)
                    .map(|i| residue(i, i + 1, 3.8 * i as f32))
                    .collect(),
            }],
            contacts: vec![
                Interaction {
                    partners: vec![0, 3],
                    kind: None,
                },
                Interaction {
                    partners: vec![1, 2],
                    kind: Some("CONTACT".to_owned()),
                },
            ],
            membrane: Some(Membrane {
                membrane_molecules: vec![[0.0, 10.0, 0.0], [5.0, 10.0, 0.0]],
                ..Membrane::default()
            }),
            ..Protein::default()
        };
        compose(&mut protein);
        protein
    }

    fn binder() -> VisualizationBinder<SceneFactory> {
        VisualizationBinder::new(SceneFactory::default(), &Config::default())
    }

    fn viewer(binder: &VisualizationBinder<SceneFactory>) -> &SceneViewer {
        binder.viewer().unwrap()
    }

    #[test]
    fn empty_pdb_text_leaves_binder_empty() {
        let mut binder = binder();
        binder.bind(&protein()).unwrap();
        assert!(binder.is_loaded());

        binder.bind(&Protein::default()).unwrap();
        assert_eq!(binder.state(), BinderState::Empty);
        assert!(binder.viewer().is_none());
        assert_eq!(binder.factory().created(), 1);
    }

    #[test]
    fn bind_draws_all_layers() {
        let mut binder = binder();
        binder.bind(&protein()).unwrap();
        let viewer = viewer(&binder);
        let names: Vec<_> = viewer.layers().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, [PROTEIN_LAYER, CONTACT_LAYER, MEMBRANE_LAYER]);

        let backbone = viewer.layer(PROTEIN_LAYER).unwrap().structure().unwrap();
        assert_eq!(backbone.atoms, 5);
        assert_eq!(backbone.mode, RenderMode::Cartoon);
        assert!(!viewer.fog());
        assert!((viewer.camera().center.x - 7.6).abs() < 1e-3);
        assert_eq!(viewer.redraws(), 0);
    }

    #[test]
    fn one_tube_per_direct_contact_between_ca_atoms() {
        let mut binder = binder();
        binder.bind(&protein()).unwrap();
        let mesh = viewer(&binder).layer(CONTACT_LAYER).unwrap().mesh().unwrap();

        // 0-3 and 1-2 are both contacts; sequence links are never drawn.
        assert_eq!(mesh.tubes.len(), 2);
        let tube = mesh.tubes[0];
        assert_eq!(tube.start, Vec3::ZERO);
        assert!((tube.end.x - 11.4).abs() < 1e-3);
        assert_eq!(tube.radius, 0.2);
        assert!(!tube.cap);
        assert_eq!(tube.color, [1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn one_sphere_per_membrane_point() {
        let mut binder = binder();
        binder.bind(&protein()).unwrap();
        let mesh = viewer(&binder).layer(MEMBRANE_LAYER).unwrap().mesh().unwrap();
        assert_eq!(mesh.spheres.len(), 2);
        assert_eq!(mesh.spheres[1].center, Vec3::new(5.0, 10.0, 0.0));
        assert_eq!(mesh.spheres[1].radius, 0.75);
        assert_eq!(mesh.spheres[1].color, [1.0, 1.0, 1.0, 0.5]);
    }

    #[test]
    fn missing_membrane_and_contacts_draw_nothing() {
        let mut protein = protein();
        protein.membrane = None;
        protein.contacts.clear();
        let mut binder = binder();
        binder.bind(&protein).unwrap();
        assert_eq!(viewer(&binder).layers().len(), 1);
    }

    #[test]
    fn render_mode_change_rebuilds_backbone_only() {
        let mut binder = binder();
        binder.bind(&protein()).unwrap();
        binder.handle(ViewEvent::SetRenderMode(RenderMode::Tube));

        let viewer = viewer(&binder);
        let backbone = viewer.layer(PROTEIN_LAYER).unwrap().structure().unwrap();
        assert_eq!(backbone.mode, RenderMode::Tube);
        assert_eq!(viewer.layer(CONTACT_LAYER).unwrap().mesh().unwrap().len(), 2);
        assert_eq!(viewer.redraws(), 0);
        assert_eq!(binder.options().render_mode, RenderMode::Tube);
    }

    #[test]
    fn toggles_hide_and_show_with_one_redraw() {
        let mut binder = binder();
        binder.bind(&protein()).unwrap();

        binder.handle(ViewEvent::ShowContacts(false));
        assert!(!viewer(&binder).layer(CONTACT_LAYER).unwrap().visible);
        assert!(viewer(&binder).layer(MEMBRANE_LAYER).unwrap().visible);
        assert_eq!(viewer(&binder).redraws(), 1);

        binder.handle(ViewEvent::ShowContacts(false));
        assert_eq!(viewer(&binder).redraws(), 1);

        binder.handle(ViewEvent::ShowContacts(true));
        let layer = viewer(&binder).layer(CONTACT_LAYER).unwrap();
        assert!(layer.visible);
        assert_eq!(layer.mesh().unwrap().len(), 2);
        assert_eq!(viewer(&binder).redraws(), 2);
    }

    #[test]
    fn enabling_never_drawn_layer_draws_it() {
        let mut config = Config::default();
        config.view.render_membrane = false;
        let mut binder = VisualizationBinder::new(SceneFactory::default(), &config);
        binder.bind(&protein()).unwrap();
        assert!(!viewer(&binder).contains(MEMBRANE_LAYER));

        binder.handle(ViewEvent::ShowMembrane(true));
        let layer = viewer(&binder).layer(MEMBRANE_LAYER).unwrap();
        assert!(layer.visible);
        assert_eq!(layer.mesh().unwrap().len(), 2);
        assert_eq!(viewer(&binder).redraws(), 1);
    }

    #[test]
    fn events_while_empty_update_options() {
        let mut binder = binder();
        binder.handle(ViewEvent::ShowPdb(true));
        binder.handle(ViewEvent::SetRenderMode(RenderMode::Spheres));
        assert!(binder.options().render_pdb);
        binder.bind(&protein()).unwrap();
        let backbone = viewer(&binder).layer(PROTEIN_LAYER).unwrap().structure().unwrap();
        assert_eq!(backbone.mode, RenderMode::Spheres);
    }

    #[test]
    fn malformed_pdb_text_is_error_and_leaves_binder_empty() {
        let mut protein = protein();
        protein.pdb_representation = atom_line(1, "CA", "ALA", 'A', 1, [0.0; 3])
            .replace("   0.000   0.000   0.000", "   0.000     abc   0.000");
        let mut binder = binder();
        assert!(matches!(
            binder.bind(&protein),
            Err(PmwError::StructureParse(_))
        ));
        assert!(!binder.is_loaded());
    }
}
