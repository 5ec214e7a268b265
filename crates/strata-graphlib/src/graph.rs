//! The core `Graph` container.
//!
//! Helper algorithms live in [`alg`] and are re-exported as `strata_graphlib::alg`.

use rustc_hash::FxBuildHasher;
use std::cell::{Ref, RefCell};

mod adj_cache;
pub mod alg;
mod edge_key;
mod entries;
mod options;

use adj_cache::AdjCache;
use edge_key::EdgeKeyView;
use entries::{EdgeEntry, NodeEntry};

pub use edge_key::EdgeKey;
pub use options::GraphOptions;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

pub struct Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    options: GraphOptions,

    graph_label: G,
    default_node_label: Box<dyn Fn() -> N + Send + Sync>,
    default_edge_label: Box<dyn Fn() -> E + Send + Sync>,

    nodes: Vec<NodeEntry<N>>,
    node_index: HashMap<String, usize>,

    edges: Vec<EdgeEntry<E>>,
    edge_index: HashMap<EdgeKey, usize>,

    // Bumped on every structural mutation; the cache is rebuilt when its generation lags behind.
    // Interior mutability keeps the query APIs on `&self`.
    adj_gen: u64,
    adj_cache: RefCell<AdjCache>,
}

impl<N, E, G> std::fmt::Debug for Graph<N, E, G>
where
    N: Default + std::fmt::Debug + 'static,
    E: Default + std::fmt::Debug + 'static,
    G: Default + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Graph")
            .field("options", &self.options)
            .field("graph_label", &self.graph_label)
            .field("nodes", &self.nodes)
            .field("edges", &self.edges)
            .finish_non_exhaustive()
    }
}

impl<N, E, G> Graph<N, E, G>
where
    N: Default + 'static,
    E: Default + 'static,
    G: Default,
{
    pub fn new(options: GraphOptions) -> Self {
        Self {
            options,
            graph_label: G::default(),
            default_node_label: Box::new(N::default),
            default_edge_label: Box::new(E::default),
            nodes: Vec::new(),
            node_index: HashMap::default(),
            edges: Vec::new(),
            edge_index: HashMap::default(),
            adj_gen: 1,
            adj_cache: RefCell::new(AdjCache::build::<E>(0, 0, &[], options.directed)),
        }
    }

    fn invalidate_adj(&mut self) {
        self.adj_gen = self.adj_gen.wrapping_add(1);
    }

    fn adj(&self) -> Ref<'_, AdjCache> {
        // Callbacks may re-enter query APIs while a shared borrow is alive. That is fine: the
        // cache is only rebuilt when stale, and nothing can make it stale through `&self`.
        let fresh = self.adj_cache.borrow().generation == self.adj_gen;
        if !fresh {
            *self.adj_cache.borrow_mut() = AdjCache::build(
                self.adj_gen,
                self.nodes.len(),
                &self.edges,
                self.options.directed,
            );
        }
        self.adj_cache.borrow()
    }

    fn edge_key_view<'a>(&self, v: &'a str, w: &'a str, name: Option<&'a str>) -> EdgeKeyView<'a> {
        let (v, w) = if self.options.directed || v <= w {
            (v, w)
        } else {
            (w, v)
        };
        let name = if self.options.multigraph { name } else { None };
        EdgeKeyView { v, w, name }
    }

    fn edge_index_of(&self, view: EdgeKeyView<'_>) -> Option<usize> {
        self.edge_index.get(&view).copied()
    }

    pub fn is_multigraph(&self) -> bool {
        self.options.multigraph
    }

    pub fn set_graph(&mut self, label: G) -> &mut Self {
        self.graph_label = label;
        self
    }

    pub fn graph(&self) -> &G {
        &self.graph_label
    }

    pub fn graph_mut(&mut self) -> &mut G {
        &mut self.graph_label
    }

    pub fn set_default_node_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> N + Send + Sync + 'static,
    {
        self.default_node_label = Box::new(f);
        self
    }

    pub fn set_default_edge_label<F>(&mut self, f: F) -> &mut Self
    where
        F: Fn() -> E + Send + Sync + 'static,
    {
        self.default_edge_label = Box::new(f);
        self
    }

    // ---- nodes ------------------------------------------------------------------------------

    pub fn has_node(&self, id: &str) -> bool {
        self.node_index.contains_key(id)
    }

    /// Inserts a node or replaces the label of an existing one.
    pub fn set_node(&mut self, id: impl Into<String>, label: N) -> &mut Self {
        let id = id.into();
        if let Some(&ix) = self.node_index.get(&id) {
            self.nodes[ix].label = label;
            return self;
        }
        self.invalidate_adj();
        let ix = self.nodes.len();
        self.nodes.push(NodeEntry {
            id: id.clone(),
            label,
        });
        self.node_index.insert(id, ix);
        self
    }

    pub fn ensure_node(&mut self, id: impl Into<String>) -> &mut Self {
        let id = id.into();
        if self.node_index.contains_key(&id) {
            return self;
        }
        let label = (self.default_node_label)();
        self.set_node(id, label)
    }

    pub fn node(&self, id: &str) -> Option<&N> {
        self.node_index.get(id).map(|&ix| &self.nodes[ix].label)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut N> {
        self.node_index
            .get(id)
            .copied()
            .map(move |ix| &mut self.nodes[ix].label)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.id.as_str())
    }

    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    pub fn node_ix(&self, id: &str) -> Option<usize> {
        self.node_index.get(id).copied()
    }

    pub fn node_id_by_ix(&self, ix: usize) -> Option<&str> {
        self.nodes.get(ix).map(|n| n.id.as_str())
    }

    pub fn node_label_by_ix(&self, ix: usize) -> Option<&N> {
        self.nodes.get(ix).map(|n| &n.label)
    }

    pub fn node_label_mut_by_ix(&mut self, ix: usize) -> Option<&mut N> {
        self.nodes.get_mut(ix).map(|n| &mut n.label)
    }

    pub fn for_each_node<F>(&self, mut f: F)
    where
        F: FnMut(&str, &N),
    {
        for n in &self.nodes {
            f(&n.id, &n.label);
        }
    }

    pub fn for_each_node_mut<F>(&mut self, mut f: F)
    where
        F: FnMut(&str, &mut N),
    {
        for n in &mut self.nodes {
            f(&n.id, &mut n.label);
        }
    }

    pub fn for_each_node_ix<F>(&self, mut f: F)
    where
        F: FnMut(usize, &str, &N),
    {
        for (ix, n) in self.nodes.iter().enumerate() {
            f(ix, &n.id, &n.label);
        }
    }

    /// Removes a node and every edge incident to it. Node and edge indices after the removed
    /// entries shift down by one.
    pub fn remove_node(&mut self, id: &str) -> bool {
        let Some(ix) = self.node_index.remove(id) else {
            return false;
        };

        self.invalidate_adj();
        self.nodes.remove(ix);
        for (i, n) in self.nodes.iter().enumerate().skip(ix) {
            if let Some(slot) = self.node_index.get_mut(n.id.as_str()) {
                *slot = i;
            }
        }

        self.edges.retain(|e| e.v_ix != ix && e.w_ix != ix);
        self.edge_index.clear();
        for (i, e) in self.edges.iter_mut().enumerate() {
            if e.v_ix > ix {
                e.v_ix -= 1;
            }
            if e.w_ix > ix {
                e.w_ix -= 1;
            }
            self.edge_index.insert(e.key.clone(), i);
        }
        true
    }

    // ---- edges ------------------------------------------------------------------------------

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn edges(&self) -> impl Iterator<Item = &EdgeKey> {
        self.edges.iter().map(|e| &e.key)
    }

    pub fn edge_keys(&self) -> Vec<EdgeKey> {
        self.edges.iter().map(|e| e.key.clone()).collect()
    }

    pub fn for_each_edge<F>(&self, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        for e in &self.edges {
            f(&e.key, &e.label);
        }
    }

    /// Like [`Graph::for_each_edge`], also passing the endpoint node indices.
    pub fn for_each_edge_ix<F>(&self, mut f: F)
    where
        F: FnMut(usize, usize, &EdgeKey, &E),
    {
        for e in &self.edges {
            f(e.v_ix, e.w_ix, &e.key, &e.label);
        }
    }

    pub fn set_edge(&mut self, v: impl Into<String>, w: impl Into<String>) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, None)
    }

    pub fn set_edge_with_label(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        label: E,
    ) -> &mut Self {
        self.set_edge_named(v, w, None::<String>, Some(label))
    }

    /// Inserts an edge, creating missing endpoints with the default node label. Setting an edge
    /// that already exists replaces its label when one is given and keeps it otherwise.
    pub fn set_edge_named(
        &mut self,
        v: impl Into<String>,
        w: impl Into<String>,
        name: Option<impl Into<String>>,
        label: Option<E>,
    ) -> &mut Self {
        let (mut v, mut w) = (v.into(), w.into());
        if !self.options.directed && v > w {
            std::mem::swap(&mut v, &mut w);
        }
        let name: Option<String> = if self.options.multigraph {
            name.map(Into::into)
        } else {
            None
        };

        self.ensure_node(v.as_str());
        self.ensure_node(w.as_str());
        let key = EdgeKey { v, w, name };

        if let Some(&ix) = self.edge_index.get(&key) {
            if let Some(label) = label {
                self.edges[ix].label = label;
            }
            return self;
        }

        let (Some(v_ix), Some(w_ix)) = (self.node_ix(&key.v), self.node_ix(&key.w)) else {
            return self;
        };
        self.invalidate_adj();
        let ix = self.edges.len();
        self.edges.push(EdgeEntry {
            key: key.clone(),
            v_ix,
            w_ix,
            label: label.unwrap_or_else(|| (self.default_edge_label)()),
        });
        self.edge_index.insert(key, ix);
        self
    }

    pub fn set_path(&mut self, nodes: &[&str]) -> &mut Self {
        for pair in nodes.windows(2) {
            self.set_edge(pair[0], pair[1]);
        }
        self
    }

    pub fn has_edge(&self, v: &str, w: &str, name: Option<&str>) -> bool {
        self.edge_index_of(self.edge_key_view(v, w, name)).is_some()
    }

    pub fn edge(&self, v: &str, w: &str, name: Option<&str>) -> Option<&E> {
        let ix = self.edge_index_of(self.edge_key_view(v, w, name))?;
        Some(&self.edges[ix].label)
    }

    pub fn edge_mut(&mut self, v: &str, w: &str, name: Option<&str>) -> Option<&mut E> {
        let ix = self.edge_index_of(self.edge_key_view(v, w, name))?;
        Some(&mut self.edges[ix].label)
    }

    pub fn edge_by_key(&self, key: &EdgeKey) -> Option<&E> {
        self.edge(&key.v, &key.w, key.name.as_deref())
    }

    /// First edge from `v_ix` to `w_ix`, whatever its name. Undirected graphs match either
    /// orientation.
    pub fn edge_by_endpoints_ix(&self, v_ix: usize, w_ix: usize) -> Option<&E> {
        let edge_ix = {
            let adj = self.adj();
            adj.out_edges(v_ix).iter().copied().find(|&edge_ix| {
                let e = &self.edges[edge_ix];
                e.other_end(v_ix) == w_ix && (e.v_ix == v_ix || !self.options.directed)
            })
        }?;
        Some(&self.edges[edge_ix].label)
    }

    pub fn has_edge_ix(&self, v_ix: usize, w_ix: usize) -> bool {
        self.edge_by_endpoints_ix(v_ix, w_ix).is_some()
    }

    fn remove_edge_at(&mut self, ix: usize) {
        self.invalidate_adj();
        let removed = self.edges.remove(ix);
        self.edge_index.remove(&removed.key);
        for (i, e) in self.edges.iter().enumerate().skip(ix) {
            if let Some(slot) = self.edge_index.get_mut(&e.key) {
                *slot = i;
            }
        }
    }

    pub fn remove_edge(&mut self, v: &str, w: &str, name: Option<&str>) -> bool {
        let Some(ix) = self.edge_index_of(self.edge_key_view(v, w, name)) else {
            return false;
        };
        self.remove_edge_at(ix);
        true
    }

    // ---- adjacency --------------------------------------------------------------------------

    pub fn successors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        self.for_each_successor(v, |w| out.push(w));
        out
    }

    pub fn predecessors(&self, v: &str) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        self.for_each_predecessor(v, |u| out.push(u));
        out
    }

    pub fn for_each_successor<'a, F>(&'a self, v: &str, mut f: F)
    where
        F: FnMut(&'a str),
    {
        let Some(v_ix) = self.node_ix(v) else {
            return;
        };
        let adj = self.adj();
        for &edge_ix in adj.out_edges(v_ix) {
            let w_ix = self.edges[edge_ix].other_end(v_ix);
            f(self.nodes[w_ix].id.as_str());
        }
    }

    pub fn for_each_predecessor<'a, F>(&'a self, v: &str, mut f: F)
    where
        F: FnMut(&'a str),
    {
        let Some(v_ix) = self.node_ix(v) else {
            return;
        };
        let adj = self.adj();
        for &edge_ix in adj.in_edges(v_ix) {
            let u_ix = self.edges[edge_ix].other_end(v_ix);
            f(self.nodes[u_ix].id.as_str());
        }
    }

    /// Successors then predecessors, without duplicates, in adjacency order.
    pub fn neighbors(&self, v: &str) -> Vec<&str> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let mut out: Vec<&str> = Vec::new();
        self.for_each_neighbor_ix(v_ix, |w_ix| out.push(self.nodes[w_ix].id.as_str()));
        out
    }

    pub fn for_each_neighbor_ix<F>(&self, v_ix: usize, mut f: F)
    where
        F: FnMut(usize),
    {
        let adj = self.adj();
        let mut seen: Vec<usize> = Vec::new();
        let lists: [&[usize]; 2] = if self.options.directed {
            [adj.out_edges(v_ix), adj.in_edges(v_ix)]
        } else {
            [adj.out_edges(v_ix), &[]]
        };
        for list in lists {
            for &edge_ix in list {
                let w_ix = self.edges[edge_ix].other_end(v_ix);
                if seen.contains(&w_ix) {
                    continue;
                }
                seen.push(w_ix);
                f(w_ix);
            }
        }
    }

    pub fn out_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let mut out: Vec<EdgeKey> = Vec::new();
        self.for_each_out_edge(v, w, |key, _| out.push(key.clone()));
        out
    }

    pub fn in_edges(&self, v: &str, w: Option<&str>) -> Vec<EdgeKey> {
        let mut out: Vec<EdgeKey> = Vec::new();
        self.for_each_in_edge(v, w, |key, _| out.push(key.clone()));
        out
    }

    pub fn for_each_out_edge<F>(&self, v: &str, w: Option<&str>, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let Some(v_ix) = self.node_ix(v) else {
            return;
        };
        let w_ix = match w {
            Some(w) => match self.node_ix(w) {
                Some(ix) => Some(ix),
                None => return,
            },
            None => None,
        };
        self.for_each_out_edge_ix(v_ix, w_ix, |_, _, key, lbl| f(key, lbl));
    }

    pub fn for_each_in_edge<F>(&self, v: &str, u: Option<&str>, mut f: F)
    where
        F: FnMut(&EdgeKey, &E),
    {
        let Some(v_ix) = self.node_ix(v) else {
            return;
        };
        let u_ix = match u {
            Some(u) => match self.node_ix(u) {
                Some(ix) => Some(ix),
                None => return,
            },
            None => None,
        };
        self.for_each_in_edge_ix(v_ix, u_ix, |_, _, key, lbl| f(key, lbl));
    }

    /// Visits edges leaving `v_ix` as `(tail_ix, head_ix, key, label)` with `tail_ix == v_ix`.
    /// Undirected graphs visit every incident edge, oriented away from `v_ix`.
    pub fn for_each_out_edge_ix<F>(&self, v_ix: usize, w_ix: Option<usize>, mut f: F)
    where
        F: FnMut(usize, usize, &EdgeKey, &E),
    {
        let adj = self.adj();
        for &edge_ix in adj.out_edges(v_ix) {
            let e = &self.edges[edge_ix];
            let head_ix = e.other_end(v_ix);
            if w_ix.is_none_or(|w_ix| w_ix == head_ix) {
                f(v_ix, head_ix, &e.key, &e.label);
            }
        }
    }

    /// Visits edges entering `v_ix` as `(tail_ix, head_ix, key, label)` with `head_ix == v_ix`.
    pub fn for_each_in_edge_ix<F>(&self, v_ix: usize, u_ix: Option<usize>, mut f: F)
    where
        F: FnMut(usize, usize, &EdgeKey, &E),
    {
        let adj = self.adj();
        for &edge_ix in adj.in_edges(v_ix) {
            let e = &self.edges[edge_ix];
            let tail_ix = e.other_end(v_ix);
            if u_ix.is_none_or(|u_ix| u_ix == tail_ix) {
                f(tail_ix, v_ix, &e.key, &e.label);
            }
        }
    }

    /// Every edge incident to `v`, each once.
    pub fn node_edges(&self, v: &str) -> Vec<EdgeKey> {
        let Some(v_ix) = self.node_ix(v) else {
            return Vec::new();
        };
        let adj = self.adj();
        let mut ixs: Vec<usize> = adj.out_edges(v_ix).to_vec();
        if self.options.directed {
            ixs.extend(adj.in_edges(v_ix).iter().copied());
            ixs.sort_unstable();
            ixs.dedup();
        }
        ixs.into_iter()
            .map(|edge_ix| self.edges[edge_ix].key.clone())
            .collect()
    }

    /// Nodes without in-edges. Every node of an undirected graph is a source.
    pub fn sources(&self) -> Vec<&str> {
        if !self.options.directed {
            return self.nodes().collect();
        }
        let adj = self.adj();
        let sources: Vec<&str> = self
            .nodes
            .iter()
            .enumerate()
            .filter(|(ix, _)| adj.in_edges(*ix).is_empty())
            .map(|(_, n)| n.id.as_str())
            .collect();
        sources
    }

    pub fn out_degree_ix(&self, v_ix: usize) -> usize {
        self.adj().out_edges(v_ix).len()
    }
}
