pub mod core;
pub mod index;
pub mod table;

/*
┌────────────────────────────────────────────────────────────────────────────────────────────┐
│                             TABULEX STRUCT ARCHITECTURE                                     │
└────────────────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────────── TABLE LAYER ────────────────────────────────────────┐
│                                                                                              │
│  ┌─────────────────────────────────────────┐   ┌─────────────────────────────────────────┐  │
│  │ struct PublishedIndex<V>                │   │ struct TableIndex<V>                    │  │
│  │ • current: RwLock<Arc<TableIndex<V>>>   │──▶│ • config: IndexConfig                   │  │
│  │ • version: AtomicU64                    │   │ • root: IndexNode<V>                    │  │
│  │ • writer: Mutex<()>   // copy-then-swap │   │ • row_count: usize                      │  │
│  └─────────────────────────────────────────┘   └────────────────────┬────────────────────┘  │
│                                                                     │                       │
│  ┌──────────────────────────────────────────────────────────────────▼────────────────────┐  │
│  │ enum IndexNode<V>            (one variant per column kind, nests IndexNode<V>)         │  │
│  │ • Exact(KeyStructure<KeyValue, IndexNode<V>>)                                          │  │
│  │ • SingleBoundRange(RangeStructure<KeyValue, IndexNode<V>>)                             │  │
│  │ • TwoBoundRange(TwoColumnRangeStructure<KeyValue, IndexNode<V>>)                       │  │
│  │ • Leaf(ResultStructure<V>)                                                             │  │
│  └────────────────────────────────────────────────────────────────────────────────────────┘  │
└──────────────────────────────────────────────────────────────────────────────────────────────┘

┌──────────────────────────────────────── INDEX LAYER ────────────────────────────────────────┐
│                                                                                              │
│  trait SearchStructure { values, get_unique, merge, copy }                                   │
│  trait Layer: SearchStructure { find(key) -> Option<&Nested>, get(key) -> Lookup<Nested> }   │
│                                                                                              │
│  ┌──────────────────────┐ ┌───────────────────────┐ ┌───────────────────────────────────┐   │
│  │ KeyStructure<K, S>   │ │ RangeStructure<K, S>  │ │ TwoColumnRangeStructure<K, S>     │   │
│  │ HashMap<K, S>        │ │ BTreeMap<Bound<K>, S> │ │ BTreeMap<TwoColumnRange<K>, S>    │   │
│  │ exact match          │ │ floor / ceiling       │ │ disjoint, split on overlap        │   │
│  └──────────────────────┘ └───────────────────────┘ └───────────────────────────────────┘   │
│                                                                                              │
│  ┌──────────────────────┐ ┌───────────────────────┐ ┌───────────────────────────────────┐   │
│  │ ResultStructure<V>   │ │ enum Bound<K>         │ │ struct TwoColumnRange<K>          │   │
│  │ HashSet<V>           │ │ -inf | Value | +inf   │ │ lower/upper + inclusivity flags   │   │
│  └──────────────────────┘ └───────────────────────┘ └───────────────────────────────────┘   │
└──────────────────────────────────────────────────────────────────────────────────────────────┘

┌───────────────────────────────────────── CORE LAYER ────────────────────────────────────────┐
│  struct IndexConfig { table, columns: Vec<ColumnSpec> }   enum ColumnKind                    │
│  enum KeyValue { Null, Bool, Integer, Number, Date, Text }   struct RowId(u64)               │
│  struct Error { kind: ErrorKind, context: String }                                           │
└──────────────────────────────────────────────────────────────────────────────────────────────┘

QUERY FLOW
══════════
index.get(Some(&k1))  ──▶ Lookup<Nested> ──▶ .get(Some(&k2)) ──▶ ... ──▶ .values() / .get_unique()
   (absent or null keys give an empty Lookup; emptiness propagates through every level)

BUILD FLOW
══════════
TableIndex::insert(keys, row) ──▶ IndexNode::path(keys, row) ──▶ root.merge(path)
   (exact / single-bound layers merge into the existing entry, two-column layers split overlaps)
*/
